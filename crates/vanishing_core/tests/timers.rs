//! Clock, quick-move bonus and snapshot behaviour over time.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use vanishing_core::{
    BONUS_FLAG_TTL, GameClock, GameConfig, GameSession, GlyphCategory, Outcome, PlayerConfig,
    PlayerId, QUICK_MOVE_BONUS_SECS, SessionEvent, Status, Termination, TimerMode,
};

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

fn timed(seconds: u32, mode: TimerMode) -> GameConfig {
    GameConfig::new(
        PlayerConfig::new("Ada".to_string(), GlyphCategory::Sports),
        PlayerConfig::new("Grace".to_string(), GlyphCategory::Nature),
    )
    .with_duration(Some(seconds))
    .with_timer_mode(mode)
}

fn start(config: GameConfig) -> GameSession<StdRng> {
    GameSession::new(config, StdRng::seed_from_u64(11), Duration::ZERO)
}

#[test]
fn test_shared_clock_runs_out_on_idle_mover() {
    let mut game = start(timed(5, TimerMode::Shared));
    for second in 1..=4 {
        game.advance(secs(second));
        assert!(!game.status().is_terminal());
    }
    game.advance(secs(5));

    assert_eq!(game.timers().clock().shared(), Some(0));
    assert_eq!(
        *game.status(),
        Status::Terminal(Termination::TimeExpired { loser: PlayerId::One })
    );
    assert_eq!(game.status().outcome(), Some(Outcome::Winner(PlayerId::Two)));
    assert!(game.snapshot().time_is_up);
    assert!(
        game.drain_events()
            .contains(&SessionEvent::TimeExpired { loser: PlayerId::One })
    );
}

#[test]
fn test_ticks_after_game_end_do_nothing() {
    let mut game = start(timed(5, TimerMode::Shared));
    game.advance(secs(5));
    let ended = game.snapshot();

    assert_eq!(game.advance(secs(60)), 0);
    assert_eq!(game.snapshot(), ended);
    assert_eq!(game.next_deadline(), None);
}

#[test]
fn test_clock_stops_at_win() {
    let mut game = start(timed(60, TimerMode::Shared));
    for index in [0, 3, 1, 4] {
        game.submit_move(index, Duration::ZERO).unwrap();
    }
    game.submit_move(2, Duration::from_millis(500)).unwrap();
    let remaining = game.timers().clock().shared();

    game.advance(secs(30));
    assert_eq!(game.timers().clock().shared(), remaining);
    assert!(matches!(game.status(), Status::Terminal(Termination::Won(_))));
}

#[test]
fn test_per_player_bonus_is_net_of_ticks() {
    let mut game = start(timed(60, TimerMode::PerPlayer));
    game.submit_move(4, Duration::ZERO).unwrap();
    assert_eq!(game.timers().clock().player(PlayerId::One), Some(65));

    game.advance(secs(3));
    assert_eq!(game.timers().clock().player(PlayerId::Two), Some(57));

    let report = game.submit_move(0, secs(3)).unwrap();
    assert_eq!(report.bonus_seconds, QUICK_MOVE_BONUS_SECS);
    assert_eq!(game.timers().clock().player(PlayerId::Two), Some(62));
    assert_eq!(game.timers().clock().player(PlayerId::One), Some(65));
}

#[test]
fn test_per_player_only_mover_loses_time() {
    let mut game = start(timed(30, TimerMode::PerPlayer).with_quick_bonus(false));
    game.advance(secs(4));
    game.submit_move(4, secs(4)).unwrap();
    game.advance(secs(10));

    assert_eq!(game.timers().clock().player(PlayerId::One), Some(26));
    assert_eq!(game.timers().clock().player(PlayerId::Two), Some(24));
    assert_eq!(game.timers().clock().shared(), None);
}

#[test]
fn test_slow_move_earns_no_bonus() {
    let mut game = start(timed(120, TimerMode::Shared));
    game.advance(secs(11));
    let report = game.submit_move(4, secs(11)).unwrap();

    assert_eq!(report.bonus_seconds, 0);
    assert_eq!(game.timers().clock().shared(), Some(109));
    assert!(!game.bonus_flag(PlayerId::One));
}

#[test]
fn test_bonus_on_last_whole_second_of_window() {
    let mut game = start(timed(120, TimerMode::Shared));
    game.advance(Duration::from_millis(10_900));
    let report = game.submit_move(4, Duration::from_millis(10_900)).unwrap();

    assert_eq!(report.bonus_seconds, QUICK_MOVE_BONUS_SECS);
    assert_eq!(game.timers().clock().shared(), Some(120 - 10 + 5));
}

#[test]
fn test_untimed_game_has_no_clock_or_bonus() {
    let config = GameConfig::new(
        PlayerConfig::new("Ada".to_string(), GlyphCategory::Sports),
        PlayerConfig::new("Grace".to_string(), GlyphCategory::Nature),
    );
    let mut game = start(config);
    assert_eq!(game.next_deadline(), None);

    let report = game.submit_move(4, secs(1)).unwrap();
    assert_eq!(report.bonus_seconds, 0);
    assert_eq!(*game.timers().clock(), GameClock::Unbounded);
    assert_eq!(game.snapshot().quick_move_remaining, None);
}

#[test]
fn test_bonus_flag_lowers_after_ttl() {
    let mut game = start(timed(60, TimerMode::Shared));
    game.submit_move(4, secs(1)).unwrap();
    assert!(game.snapshot().bonus_flags[PlayerId::One.index()]);

    game.advance(secs(1) + BONUS_FLAG_TTL);
    assert!(!game.snapshot().bonus_flags[PlayerId::One.index()]);
}

#[test]
fn test_clock_mode_fixed_for_session() {
    let mut game = start(timed(40, TimerMode::PerPlayer));
    game.submit_move(4, secs(2)).unwrap();
    game.advance(secs(8));
    game.reset(secs(8));
    game.advance(secs(20));

    assert!(matches!(game.timers().clock(), GameClock::PerPlayer { .. }));
    assert_eq!(game.timers().clock().shared(), None);
}

#[test]
fn test_snapshot_serializes_to_json() {
    let mut game = start(timed(90, TimerMode::Shared));
    game.submit_move(4, secs(1)).unwrap();

    // The tick due at 1s runs before the move, then the bonus is credited.
    let json = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(json["clock"]["mode"], "shared");
    assert_eq!(json["clock"]["remaining"], 89 + 5);
    assert_eq!(json["mover"], "Two");
    assert_eq!(json["bonus_flags"], serde_json::json!([true, false]));
    assert_eq!(json["quick_move_remaining"], 10);
    assert!(json["outcome"].is_null());
}

#[test]
fn test_move_after_expiry_without_advance_is_game_over() {
    let mut game = start(timed(5, TimerMode::Shared).with_quick_bonus(false));
    let result = game.submit_move(4, secs(20));

    assert_eq!(result, Err(vanishing_core::MoveError::GameOver));
    assert_eq!(game.status().outcome(), Some(Outcome::Winner(PlayerId::Two)));
    assert!(
        game.drain_events()
            .contains(&SessionEvent::TimeExpired { loser: PlayerId::One })
    );
}
