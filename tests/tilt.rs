// Tilt geometry checks over a sweep of pointer positions (native, no DOM).

use std::cell::RefCell;

use venb_gateway::tilt::{Rect, Tilt, TiltController, TiltParams, TiltStyle, TiltSurface};

struct Card {
    rect: Rect,
    applied: RefCell<Vec<TiltStyle>>,
}

impl TiltSurface for Card {
    fn bounds(&self) -> Rect {
        self.rect
    }
    fn apply_style(&self, style: &TiltStyle) {
        self.applied.borrow_mut().push(style.clone());
    }
}

#[test]
fn rotations_stay_within_five_degrees_inside_bounds() {
    let (w, h) = (320.0, 180.0);
    for ix in 0..=32 {
        for iy in 0..=18 {
            let x = w * ix as f64 / 32.0;
            let y = h * iy as f64 / 18.0;
            let t = Tilt::from_pointer(x, y, w, h, 10.0).unwrap();
            assert!((-5.0..=5.0).contains(&t.rotate_x_deg), "rotateX {} at ({x},{y})", t.rotate_x_deg);
            assert!((-5.0..=5.0).contains(&t.rotate_y_deg), "rotateY {} at ({x},{y})", t.rotate_y_deg);
        }
    }
}

#[test]
fn pointer_below_and_right_tilts_away_from_viewer() {
    let t = Tilt::from_pointer(300.0, 170.0, 320.0, 180.0, 10.0).unwrap();
    assert!(t.rotate_x_deg < 0.0);
    assert!(t.rotate_y_deg > 0.0);
}

#[test]
fn leave_resets_regardless_of_prior_tilt() {
    let card = Card {
        rect: Rect::new(100.0, 200.0, 240.0, 120.0),
        applied: RefCell::new(Vec::new()),
    };
    let ctl = TiltController::new(vec![card], TiltParams::default());
    ctl.pointer_move(0, 110.0, 210.0);
    ctl.pointer_move(0, 330.0, 310.0);
    ctl.pointer_leave(0);
    ctl.pointer_leave(0);

    let applied = ctl.cards()[0].applied.borrow();
    assert_eq!(applied.len(), 4);
    assert!(!applied[1].is_cleared());
    assert!(applied[2].is_cleared());
    assert!(applied[3].is_cleared());
    assert_eq!(applied[3].transform, "");
    assert_eq!(applied[3].background, "");
}

#[test]
fn highlight_follows_raw_pointer_position() {
    let card = Card {
        rect: Rect::new(10.0, 10.0, 100.0, 100.0),
        applied: RefCell::new(Vec::new()),
    };
    let ctl = TiltController::new(vec![card], TiltParams::default());
    ctl.pointer_move(0, 35.0, 85.0);
    let applied = ctl.cards()[0].applied.borrow();
    assert!(applied[0].background.starts_with("radial-gradient(circle at 25px 75px,"));
    assert!(applied[0].transform.starts_with("perspective(1000px) rotateX(-2.5deg) rotateY(-2.5deg)"));
}
