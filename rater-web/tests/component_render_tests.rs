use futures::executor::block_on;
use rater_web::components::{StarRating, StarRatingProps};
use yew::{AttrValue, Classes, LocalServerRenderer};

fn props() -> StarRatingProps {
    StarRatingProps {
        max: 5,
        rating: Some(3.5),
        read_only: true,
        star_size: 12.0,
        step: Some(0.5),
        reverse: false,
        busy_text: Some(AttrValue::from("Saving")),
        class: Classes::from("cards__rating"),
        on_hover: None,
        on_rate: None,
    }
}

#[test]
fn star_rating_renders_accessible_host() {
    let html = block_on(LocalServerRenderer::<StarRating>::with_props(props()).render());
    assert!(html.contains("star-rating-host"));
    assert!(html.contains("cards__rating"));
    assert!(html.contains("role=\"slider\""));
    assert!(html.contains("aria-valuemax=\"5\""));
    assert!(html.contains("aria-valuenow=\"3.5\""));
    assert!(html.contains("aria-readonly=\"true\""));
}

#[test]
fn unrated_star_rating_omits_current_value() {
    let mut unrated = props();
    unrated.rating = None;
    unrated.read_only = false;
    let html = block_on(LocalServerRenderer::<StarRating>::with_props(unrated).render());
    assert!(!html.contains("aria-valuenow"));
    assert!(html.contains("aria-readonly=\"false\""));
}

#[test]
fn props_translate_to_widget_options() {
    let options = props().options();
    assert_eq!(options.max, 5);
    assert_eq!(options.rating, Some(3.5));
    assert!(options.read_only);
    assert_eq!(options.step, Some(0.5));
    assert_eq!(options.is_busy_text.as_deref(), Some("Saving"));
    let settings = options.validate().expect("valid options");
    assert!((settings.star_size - 12.0).abs() < f64::EPSILON);
}
