use rater_core::{HeadlessSurface, Rater, RaterHooks, RaterPhase, Surface};
use rater_web::page::{self, DESCRIPTION_LIMIT};

#[test]
fn card_options_bind_read_only_ratings() {
    let card = HeadlessSurface::new(60.0).with_class("cards__rating");
    let rater = Rater::bind(card.clone(), &page::card_rating_options(), RaterHooks::new())
        .expect("card options are valid");
    assert_eq!(rater.rating(), Some(3.3));
    assert_eq!(rater.phase(), RaterPhase::Disabled);
    assert_eq!(card.style("width").as_deref(), Some("60px"));
    assert_eq!(card.attribute("title").as_deref(), Some("Thank you for your vote!"));
    assert!((rater.fill() - 66.0).abs() < 1e-9);
}

#[test]
fn descriptions_are_cut_with_ellipsis() {
    let text = "Lorem ipsum dolor sit amet, ".repeat(10);
    let cut = page::truncate_text(&text, DESCRIPTION_LIMIT).expect("long text is cut");
    assert!(cut.ends_with("..."));
    assert_eq!(cut.chars().count(), DESCRIPTION_LIMIT);
    assert!(text.starts_with(cut.trim_end_matches("...")));
}

#[test]
fn multibyte_descriptions_cut_on_char_boundaries() {
    let text = "é".repeat(DESCRIPTION_LIMIT + 1);
    let cut = page::truncate_text(&text, DESCRIPTION_LIMIT).expect("long text is cut");
    assert_eq!(cut.chars().count(), DESCRIPTION_LIMIT);
}
