use rand::rngs::StdRng;
use rand::SeedableRng;

use tui_bingo::core::{EngineConfig, FixedReward, GameController, Ledger};
use tui_bingo::term::{encode_diff_into, AnchorY, CardOverlay, CardView, FrameBuffer, PickerView, SeedInput, Viewport};
use tui_bingo::types::{CellPos, RoundPhase};

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height()).map(|y| fb.row_text(y) + "\n").collect()
}

fn active_controller(seed: i64) -> GameController<StdRng> {
    let config = EngineConfig {
        countdown_secs: 0,
        ..EngineConfig::default()
    };
    let mut c = GameController::with_rng(config, StdRng::seed_from_u64(2)).with_reward_policy(FixedReward(321));
    c.start_round(seed).unwrap();
    c
}

#[test]
fn term_view_renders_frame_corners() {
    let c = active_controller(42);
    let view = CardView::default().with_anchor_y(AnchorY::Top);
    let vp = Viewport::new(58, 24);
    let fb = view.render(&c.snapshot(), &CardOverlay::default(), vp);

    // 5 cells of 6 columns plus border; header, 5 rows of 2, border.
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(31, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 12).unwrap().ch, '└');
    assert_eq!(fb.get(31, 12).unwrap().ch, '┘');
    assert!(fb.row_text(1).contains('B'));
    assert!(fb.row_text(1).contains('O'));
}

#[test]
fn term_view_tracks_a_live_round() {
    let mut c = active_controller(42);
    let view = CardView::default();
    let vp = Viewport::new(80, 30);

    let before = view.render(&c.snapshot(), &CardOverlay::default(), vp);
    assert!(screen_text(&before).contains("Game Active"));

    c.advance(2_000);
    let snap = c.snapshot();
    let ball = snap.last_called().unwrap();
    let after = view.render(&snap, &CardOverlay::default(), vp);
    let text = screen_text(&after);
    assert!(text.contains(&format!("-{ball}")));
    assert!(text.contains("1/75"));

    let mut diff = Vec::new();
    encode_diff_into(&before, &after, &mut diff).unwrap();
    assert!(!diff.is_empty());
}

#[test]
fn term_view_shows_the_win() {
    let mut c = active_controller(42);
    c.set_auto_mark(true);
    c.advance(2_000 + 75 * 5_000);
    assert_eq!(c.phase(), RoundPhase::Won);

    let view = CardView::default();
    let fb = view.render(
        &c.snapshot(),
        &CardOverlay {
            cursor: CellPos::at(0, 0),
            message: None,
        },
        Viewport::new(80, 30),
    );
    let text = screen_text(&fb);
    assert!(text.contains("B I N G O !"));
    assert!(text.contains("+321"));
    assert!(text.contains("play again"));
}

#[test]
fn picker_view_lists_wallet_history() {
    let mut ledger = Ledger::new();
    ledger.record_win(17, 180);
    ledger.record_loss();
    let input = SeedInput::default();
    let view = PickerView {
        input: &input,
        message: None,
        ledger: &ledger,
        extras: None,
        leaderboard: &[],
    };
    let mut fb = FrameBuffer::new(0, 0);
    view.render_into(Viewport::new(60, 30), &mut fb);
    let text = screen_text(&fb);
    assert!(text.contains("180.00"));
    assert!(text.contains("Bingo Win - Room #17"));
    assert!(text.contains("Won 1 of 2"));
}
