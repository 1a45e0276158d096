use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::{Context, Result, bail, ensure};
use rand::Rng;
use rater_core::{
    HeadlessSurface, RaterHooks, RaterOptions, RaterPhase, RatingError, SubmissionHandle, Surface,
};

use super::{SURFACE_WIDTH, ScenarioCtx, TestScenario};

const EPSILON: f64 = 1e-6;

pub static SCENARIOS: &[TestScenario] = &[
    TestScenario {
        name: "whole-star-hover",
        description: "Hover at 42% of a 5-star widget rounds up to 3 stars",
        run: whole_star_hover,
    },
    TestScenario {
        name: "half-step-hover",
        description: "Hover at 42% with step 0.5 lands on 2.5",
        run: half_step_hover,
    },
    TestScenario {
        name: "read-only-card",
        description: "Read-only widget keeps its rating and never submits",
        run: read_only_card,
    },
    TestScenario {
        name: "submit-lifecycle",
        description: "Commit opens a submission that blocks re-commits until completed",
        run: submit_lifecycle,
    },
    TestScenario {
        name: "clear-rating",
        description: "Clearing a committed rating empties the fill",
        run: clear_rating,
    },
    TestScenario {
        name: "overshoot-tolerance",
        description: "Samples up to 101% are clamped, beyond that they are ignored",
        run: overshoot_tolerance,
    },
    TestScenario {
        name: "reverse-axis",
        description: "Right-to-left widgets measure from the right edge",
        run: reverse_axis,
    },
    TestScenario {
        name: "random-pointer-sweep",
        description: "Seeded pointer samples stay on the step grid within [0, max]",
        run: random_pointer_sweep,
    },
    TestScenario {
        name: "rating-validation",
        description: "setRating rejects null, NaN and out-of-range values without side effects",
        run: rating_validation,
    },
    TestScenario {
        name: "toggle-idempotence",
        description: "disable/enable and dispose are safe to repeat",
        run: toggle_idempotence,
    },
];

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < EPSILON
}

fn at_percent(percent: f64) -> f64 {
    SURFACE_WIDTH * percent / 100.0
}

fn whole_star_hover(ctx: &mut ScenarioCtx) -> Result<()> {
    let rater = ctx.bind(&RaterOptions::default(), RaterHooks::new())?;
    rater.pointer_move(at_percent(42.0));
    ensure!(rater.pending() == Some(3.0), "pending was {:?}", rater.pending());
    ensure!(close(rater.fill(), 60.0), "fill was {}", rater.fill());
    let width = rater.overlay().style("width");
    ensure!(width.as_deref() == Some("60%"), "overlay width was {width:?}");
    ensure!(rater.rating().is_none(), "hover must not commit");
    Ok(())
}

fn half_step_hover(ctx: &mut ScenarioCtx) -> Result<()> {
    let rater = ctx.bind(&RaterOptions::default().with_step(0.5), RaterHooks::new())?;
    rater.pointer_move(at_percent(42.0));
    ensure!(rater.pending() == Some(2.5), "pending was {:?}", rater.pending());
    ensure!(close(rater.fill(), 50.0), "fill was {}", rater.fill());
    Ok(())
}

fn read_only_card(ctx: &mut ScenarioCtx) -> Result<()> {
    let calls = Rc::new(Cell::new(0_u32));
    let seen = Rc::clone(&calls);
    let options = RaterOptions::default()
        .with_read_only(true)
        .with_rating(3.3);
    let rater = ctx.bind(
        &options,
        RaterHooks::new().on_rate(move |_, submission| {
            seen.set(seen.get() + 1);
            submission.complete();
        }),
    )?;
    ensure!(rater.rating() == Some(3.3), "rating was {:?}", rater.rating());
    rater.pointer_move(at_percent(ctx.rng.gen_range(0.0..100.0)));
    rater.commit();
    ensure!(calls.get() == 0, "rate hook fired {} times", calls.get());
    ensure!(rater.rating() == Some(3.3), "rating changed to {:?}", rater.rating());
    ensure!(rater.phase() == RaterPhase::Disabled, "phase was {:?}", rater.phase());
    Ok(())
}

fn submit_lifecycle(ctx: &mut ScenarioCtx) -> Result<()> {
    let parked: Rc<RefCell<Vec<SubmissionHandle<HeadlessSurface>>>> = Rc::default();
    let sink = Rc::clone(&parked);
    let rater = ctx.bind(
        &RaterOptions::default().with_busy_text("Saving..."),
        RaterHooks::new().on_rate(move |_, submission| sink.borrow_mut().push(submission)),
    )?;
    rater.pointer_move(at_percent(80.0));
    rater.commit();
    ensure!(rater.is_submitting(), "commit did not open a submission");
    ensure!(
        rater.element().attribute("title").as_deref() == Some("Saving..."),
        "busy text missing"
    );

    rater.commit();
    ensure!(parked.borrow().len() == 1, "re-commit opened a second submission");

    rater
        .set_rating(4.0)
        .context("setRating while submitting")?;
    ensure!(rater.rating() == Some(4.0), "rating was {:?}", rater.rating());

    let Some(handle) = parked.borrow_mut().pop() else {
        bail!("rate hook never received a submission");
    };
    ensure!(close(handle.candidate(), 4.0), "candidate was {}", handle.candidate());
    handle.complete();
    ensure!(!rater.is_submitting(), "completion left the widget busy");
    ensure!(
        !rater.element().has_class("is-busy"),
        "busy class survived completion"
    );
    Ok(())
}

fn clear_rating(ctx: &mut ScenarioCtx) -> Result<()> {
    let rater = ctx.bind(&RaterOptions::default(), RaterHooks::new())?;
    rater.set_rating(4.0)?;
    rater.clear();
    ensure!(rater.rating().is_none(), "rating was {:?}", rater.rating());
    ensure!(close(rater.fill(), 0.0), "fill was {}", rater.fill());
    Ok(())
}

fn overshoot_tolerance(ctx: &mut ScenarioCtx) -> Result<()> {
    let rater = ctx.bind(&RaterOptions::default(), RaterHooks::new())?;
    rater.pointer_move(at_percent(100.5));
    ensure!(rater.pending() == Some(5.0), "pending was {:?}", rater.pending());
    rater.pointer_move(at_percent(20.0));
    let beyond = ctx.rng.gen_range(101.0..150.0);
    rater.pointer_move(at_percent(beyond));
    ensure!(
        rater.pending() == Some(1.0),
        "sample at {beyond:.2}% changed pending to {:?}",
        rater.pending()
    );
    Ok(())
}

fn reverse_axis(ctx: &mut ScenarioCtx) -> Result<()> {
    let rater = ctx.bind(&RaterOptions::default().with_reverse(true), RaterHooks::new())?;
    ensure!(rater.overlay().has_class("rtl"), "overlay missing rtl class");
    rater.pointer_move(at_percent(20.0));
    ensure!(rater.pending() == Some(4.0), "pending was {:?}", rater.pending());
    Ok(())
}

fn random_pointer_sweep(ctx: &mut ScenarioCtx) -> Result<()> {
    let steps = [1.0, 0.5, 0.25, 0.1];
    let step = steps[ctx.rng.gen_range(0..steps.len())];
    let max = ctx.rng.gen_range(1..=10_u32);
    let options = RaterOptions::default().with_max(max).with_step(step);
    let rater = ctx.bind(&options, RaterHooks::new())?;
    let max = f64::from(max);

    for _ in 0..200 {
        let x = ctx.rng.gen_range(0.0..=SURFACE_WIDTH);
        rater.pointer_move(x);
        let pending = rater
            .pending()
            .with_context(|| format!("no pending rating at x={x:.3}"))?;
        let raw = x / SURFACE_WIDTH * max;
        ensure!(
            (0.0..=max).contains(&pending),
            "pending {pending} outside [0, {max}] at x={x:.3}"
        );
        let units = pending / step;
        ensure!(
            (units - units.round()).abs() < EPSILON,
            "pending {pending} is off the {step} grid"
        );
        ensure!(
            pending + EPSILON >= raw.min(max) && pending - raw < step + EPSILON,
            "pending {pending} is not the smallest step above {raw:.4}"
        );
        ensure!(
            close(rater.fill(), pending * 100.0 / max),
            "fill {} does not match pending {pending}",
            rater.fill()
        );
    }
    Ok(())
}

fn rating_validation(ctx: &mut ScenarioCtx) -> Result<()> {
    let rater = ctx.bind(&RaterOptions::default().with_rating(2.0), RaterHooks::new())?;
    let too_high = 5.0 + ctx.rng.gen_range(0.01..10.0);
    let cases = [
        (rater.set_rating(None::<f64>), RatingError::NullValue),
        (rater.set_rating(f64::NAN), RatingError::NotANumber),
        (
            rater.set_rating(too_high),
            RatingError::OutOfRange {
                value: too_high,
                max: 5,
            },
        ),
        (
            rater.set_rating(-1.0),
            RatingError::OutOfRange {
                value: -1.0,
                max: 5,
            },
        ),
    ];
    for (result, expected) in cases {
        ensure!(
            result.as_ref() == Err(&expected),
            "expected {expected}, got {result:?}"
        );
    }
    ensure!(rater.rating() == Some(2.0), "rejected values changed the rating");
    Ok(())
}

fn toggle_idempotence(ctx: &mut ScenarioCtx) -> Result<()> {
    let rater = ctx.bind(&RaterOptions::default(), RaterHooks::new())?;
    rater.disable();
    rater.disable();
    ensure!(rater.is_read_only(), "disable did not stick");
    ensure!(rater.element().has_class("disabled"), "disabled class missing");
    rater.enable();
    rater.enable();
    ensure!(!rater.is_read_only(), "enable did not stick");
    ensure!(!rater.element().has_class("disabled"), "disabled class survived enable");

    rater.dispose();
    rater.dispose();
    ensure!(rater.phase() == RaterPhase::Disposed, "phase was {:?}", rater.phase());
    rater.pointer_move(at_percent(50.0));
    ensure!(rater.pending().is_none(), "disposed widget reacted to input");
    Ok(())
}
