//! Session lifecycle tests through the orchestrator.
//!
//! These tests drive `SessionService` end to end against the in-memory
//! store and the recording scheduler: create, signups, start, auto-start,
//! reminders, and the post-win reset.

#![allow(clippy::unwrap_used)]

use splash_engine::{
    AbilityKind, AbilityOutcome, Catalog, CellPos, DurationMs, EngineError, GameMode, MemoryStore,
    ParticipantId, PieceKind, RecordingScheduler, ScheduledTask, Session, SessionKey,
    SessionService, SignupPreferences, Store, TaskOutcome, Team, Timestamp,
};

type Service = SessionService<MemoryStore, RecordingScheduler>;

const KEY: SessionKey = SessionKey::new(77);
const NOON_MS: i64 = 43_200_000;

fn t(millis: i64) -> Timestamp {
    Timestamp::from_millis(millis)
}

fn p(id: u64) -> ParticipantId {
    ParticipantId::new(id)
}

fn service() -> Service {
    SessionService::new(MemoryStore::new(), RecordingScheduler::new())
}

/// A service whose store already holds a prepared session under `KEY`.
fn service_with(session: &Session) -> Service {
    let mut store = MemoryStore::new();
    store.put_session(KEY, session).unwrap();
    SessionService::new(store, RecordingScheduler::new())
}

fn stored_session(service: &Service) -> Session {
    service.store().get_session(KEY).unwrap().unwrap()
}

#[test]
fn test_create_and_start() {
    let mut service = service();
    let now = t(1_000);

    assert_eq!(service.start_game(KEY, now).unwrap_err(), EngineError::NoGame);

    let created = service
        .create_game(KEY, GameMode::Splash3, true, None)
        .unwrap();
    assert!(!created.replaced_active);

    assert_eq!(
        service.start_game(KEY, now).unwrap_err(),
        EngineError::TooFewPlayers { minimum: 2 }
    );

    service
        .admin_add(KEY, p(1), Team::Blue, PieceKind::Leader, now)
        .unwrap();
    service
        .admin_add(KEY, p(2), Team::Red, PieceKind::Leader, now)
        .unwrap();

    let started = service.start_game(KEY, now).unwrap();
    assert_eq!(started.players, 2);
    assert_eq!(started.recommended, 9);
    assert!(started.below_recommended);

    assert_eq!(
        service.start_game(KEY, now).unwrap_err(),
        EngineError::AlreadyActive
    );

    let session = stored_session(&service);
    assert!(session.active);
    assert!(!session.signups_open);
    assert_eq!(session.started, Some(now));
}

#[test]
fn test_recreate_replaces_active_game() {
    let mut service = service();
    let now = t(0);
    service
        .create_game(KEY, GameMode::Splash3, true, None)
        .unwrap();
    service
        .admin_add(KEY, p(1), Team::Blue, PieceKind::Leader, now)
        .unwrap();
    service
        .admin_add(KEY, p(2), Team::Red, PieceKind::Leader, now)
        .unwrap();
    service.start_game(KEY, now).unwrap();

    let created = service
        .create_game(KEY, GameMode::Frontier, true, None)
        .unwrap();
    assert!(created.replaced_active);

    let session = stored_session(&service);
    assert!(!session.active);
    assert_eq!(session.roster.pieces.len(), 6);
    assert!(session.roster.owners().is_empty());
}

#[test]
fn test_signup_preconditions() {
    let mut service = service();
    let now = t(0);
    let prefs = SignupPreferences::default();

    assert_eq!(
        service.signup(KEY, p(1), prefs, now).unwrap_err(),
        EngineError::NoGame
    );

    service
        .create_game(KEY, GameMode::Splash3, true, None)
        .unwrap();
    service.signup(KEY, p(1), prefs, now).unwrap();
    assert_eq!(
        service.signup(KEY, p(1), prefs, now).unwrap_err(),
        EngineError::AlreadySignedUp
    );

    service.set_signups(KEY, false).unwrap();
    assert_eq!(
        service.signup(KEY, p(2), prefs, now).unwrap_err(),
        EngineError::SignupsClosed
    );

    service.set_signups(KEY, true).unwrap();
    service.signup(KEY, p(2), prefs, now).unwrap();
    service.start_game(KEY, now).unwrap();
    assert_eq!(
        service.signup(KEY, p(3), prefs, now).unwrap_err(),
        EngineError::AlreadyActive
    );
}

#[test]
fn test_filling_roster_schedules_auto_start() {
    let mut service = service();
    // Mid-morning, well before the noon boundary.
    let now = t(10_000_000);
    let prefs = SignupPreferences::default();
    service
        .create_game(KEY, GameMode::Frontier, true, None)
        .unwrap();

    for id in 1..=5 {
        let report = service.signup(KEY, p(id), prefs, now).unwrap();
        assert!(!report.outcome.roster_filled);
        assert_eq!(report.auto_start_at, None);
    }
    let last = service.signup(KEY, p(6), prefs, now).unwrap();
    assert!(last.outcome.roster_filled);
    assert_eq!(last.auto_start_at, Some(t(NOON_MS)));

    let scheduled = service.scheduler_mut().drain();
    assert_eq!(
        scheduled,
        vec![(
            t(NOON_MS),
            ScheduledTask::AutoStart {
                key: KEY,
                generation: 1,
            }
        )]
    );

    // The roster is full and signups are now closed.
    assert_eq!(
        service.signup(KEY, p(7), prefs, now).unwrap_err(),
        EngineError::SignupsClosed
    );
}

#[test]
fn test_auto_start_task_starts_full_game() {
    let mut service = service();
    let now = t(10_000_000);
    let prefs = SignupPreferences::default();
    service
        .create_game(KEY, GameMode::Frontier, true, None)
        .unwrap();
    for id in 1..=6 {
        service.signup(KEY, p(id), prefs, now).unwrap();
    }

    let task = ScheduledTask::AutoStart {
        key: KEY,
        generation: 1,
    };
    let outcome = service.handle_task(task, t(NOON_MS)).unwrap();
    assert_eq!(
        outcome,
        TaskOutcome::Started {
            players: 6,
            recommended: 6,
        }
    );

    let session = stored_session(&service);
    assert!(session.active);
    assert_eq!(session.started, Some(t(NOON_MS)));
}

#[test]
fn test_auto_start_suppressed_below_recommended() {
    let mut service = service();
    let now = t(10_000_000);
    let prefs = SignupPreferences::default();
    service
        .create_game(KEY, GameMode::Frontier, true, None)
        .unwrap();
    for id in 1..=6 {
        service.signup(KEY, p(id), prefs, now).unwrap();
    }

    // One player backs out before noon; close signups again so only the
    // player count decides.
    service.leave(KEY, p(3)).unwrap();
    service.set_signups(KEY, false).unwrap();

    let task = ScheduledTask::AutoStart {
        key: KEY,
        generation: 1,
    };
    let outcome = service.handle_task(task, t(NOON_MS)).unwrap();
    assert_eq!(outcome, TaskOutcome::Suppressed);
    assert!(!stored_session(&service).active);
}

#[test]
fn test_stale_auto_start_suppressed_after_recreate() {
    let mut service = service();
    let now = t(10_000_000);
    let prefs = SignupPreferences::default();
    service
        .create_game(KEY, GameMode::Frontier, true, None)
        .unwrap();
    for id in 1..=6 {
        service.signup(KEY, p(id), prefs, now).unwrap();
    }

    // Recreating bumps the generation; the pending task is now stale.
    service
        .create_game(KEY, GameMode::Frontier, false, None)
        .unwrap();

    let task = ScheduledTask::AutoStart {
        key: KEY,
        generation: 1,
    };
    let outcome = service.handle_task(task, t(NOON_MS)).unwrap();
    assert_eq!(outcome, TaskOutcome::Suppressed);
}

#[test]
fn test_leave_reopens_signups() {
    let mut service = service();
    let now = t(0);
    let prefs = SignupPreferences::default();
    service
        .create_game(KEY, GameMode::Frontier, true, None)
        .unwrap();
    for id in 1..=6 {
        service.signup(KEY, p(id), prefs, now).unwrap();
    }
    assert!(!stored_session(&service).signups_open);

    let change = service.leave(KEY, p(2)).unwrap();
    assert!(change.signups_now_open);
    assert!(!change.mid_game);

    service.signup(KEY, p(9), prefs, now).unwrap();
    assert_eq!(
        service.leave(KEY, p(2)).unwrap_err(),
        EngineError::NotParticipant
    );
}

#[test]
fn test_leave_rejected_mid_game() {
    let mut service = service();
    let now = t(0);
    service
        .create_game(KEY, GameMode::Splash3, true, None)
        .unwrap();
    service
        .admin_add(KEY, p(1), Team::Blue, PieceKind::Leader, now)
        .unwrap();
    service
        .admin_add(KEY, p(2), Team::Red, PieceKind::Leader, now)
        .unwrap();
    service.start_game(KEY, now).unwrap();

    assert_eq!(
        service.leave(KEY, p(1)).unwrap_err(),
        EngineError::AlreadyActive
    );

    // An admin can still pull a player out of a running game.
    let change = service.admin_remove(KEY, p(1)).unwrap();
    assert!(change.mid_game);
    assert!(!change.signups_now_open);
}

#[test]
fn test_set_cooldown() {
    let mut service = service();
    let now = t(0);
    assert_eq!(
        service
            .set_cooldown(KEY, DurationMs::from_minutes(10))
            .unwrap_err(),
        EngineError::NoGame
    );

    service
        .create_game(KEY, GameMode::Splash3, true, None)
        .unwrap();
    let mid_game = service
        .set_cooldown(KEY, DurationMs::from_minutes(10))
        .unwrap();
    assert!(!mid_game);
    assert_eq!(stored_session(&service).cooldown, DurationMs::from_minutes(10));

    service
        .admin_add(KEY, p(1), Team::Blue, PieceKind::Leader, now)
        .unwrap();
    service
        .admin_add(KEY, p(2), Team::Red, PieceKind::Leader, now)
        .unwrap();
    service.start_game(KEY, now).unwrap();
    let mid_game = service
        .set_cooldown(KEY, DurationMs::from_minutes(5))
        .unwrap();
    assert!(mid_game);
}

#[test]
fn test_cooldown_reminder_gating() {
    let catalog = Catalog::builtin();
    let mut session = Session::empty(1);
    session.create_from(&catalog, GameMode::Splash3, true, None);
    session.active = true;
    session.signups_open = false;
    session.roster.pieces[1].owner = Some(p(1));
    session.roster.pieces[1].pos = CellPos::new(5, 5);
    let mut service = service_with(&session);
    let now = t(0);

    let outcome = service
        .use_ability(KEY, p(1), AbilityKind::Splash, now)
        .unwrap();
    let report = match outcome {
        AbilityOutcome::Applied(report) => report,
        other => panic!("expected immediate application, got {other:?}"),
    };

    let scheduled = service.scheduler_mut().drain();
    assert_eq!(
        scheduled,
        vec![(
            report.cooldown_until,
            ScheduledTask::CooldownReminder {
                key: KEY,
                participant: p(1),
                generation: 1,
            }
        )]
    );

    // The reminder only pings participants who opted in.
    let task = scheduled[0].1;
    let fired = service.handle_task(task, report.cooldown_until).unwrap();
    assert_eq!(fired, TaskOutcome::Suppressed);

    service.set_cooldown_ping(p(1), true, now).unwrap();
    let fired = service.handle_task(task, report.cooldown_until).unwrap();
    assert_eq!(fired, TaskOutcome::Notify(p(1)));

    // Fired early, the cooldown is still running and the reminder is wrong.
    let fired = service.handle_task(task, now.plus(DurationMs::from_secs(1))).unwrap();
    assert_eq!(fired, TaskOutcome::Suppressed);
}

#[test]
fn test_win_resets_session_and_credits_profiles() {
    let catalog = Catalog::builtin();
    let mut session = Session::empty(1);
    session.create_from(&catalog, GameMode::Splash3, true, None);
    session.active = true;
    session.signups_open = false;
    session.roster.pieces[1].owner = Some(p(1)); // blue colorer
    session.roster.pieces[1].pos = CellPos::new(5, 5);
    session.roster.pieces[3].owner = Some(p(2)); // red leader

    // Bring blue to 57 cells; the splash's four neighbors make it 61.
    let neighbors = [
        CellPos::new(4, 5),
        CellPos::new(6, 5),
        CellPos::new(5, 4),
        CellPos::new(5, 6),
    ];
    let mut painted = session.grid.count_for(Team::Blue);
    'outer: for x in 0..11 {
        for y in 0..11 {
            if painted >= 57 {
                break 'outer;
            }
            let pos = CellPos::new(x, y);
            if session.grid.team_at(pos).is_none() && !neighbors.contains(&pos) {
                session.grid.set(pos, 1, Team::Blue);
                painted += 1;
            }
        }
    }
    let mut service = service_with(&session);
    let now = t(1_000);

    let outcome = service
        .use_ability(KEY, p(1), AbilityKind::Splash, now)
        .unwrap();
    let report = match outcome {
        AbilityOutcome::Applied(report) => report,
        other => panic!("expected immediate application, got {other:?}"),
    };
    let win = report.win.expect("the splash should clinch the game");
    assert_eq!(win.team, Team::Blue);

    // The session is back to its idle state under a new generation.
    let session = stored_session(&service);
    assert!(session.config.is_none());
    assert!(!session.active);
    assert!(session.signups_open);
    assert!(session.grid.is_empty());
    assert_eq!(session.generation, 2);

    // No reminder survives a finished game.
    assert!(service.scheduler_mut().drain().is_empty());

    let winner = service.store().get_profile(p(1)).unwrap().unwrap();
    assert_eq!(winner.stats.games_played, 1);
    assert_eq!(winner.stats.games_won, 1);
    assert_eq!(winner.stats.actions_taken, 1);
    assert_eq!(winner.stats.abilities_used, 1);

    let loser = service.store().get_profile(p(2)).unwrap().unwrap();
    assert_eq!(loser.stats.games_played, 1);
    assert_eq!(loser.stats.games_won, 0);
}

#[test]
fn test_admin_add_rejects_taken_position() {
    let mut service = service();
    let now = t(0);
    service
        .create_game(KEY, GameMode::Splash3, true, None)
        .unwrap();
    service
        .admin_add(KEY, p(1), Team::Blue, PieceKind::Leader, now)
        .unwrap();

    assert_eq!(
        service
            .admin_add(KEY, p(2), Team::Blue, PieceKind::Leader, now)
            .unwrap_err(),
        EngineError::PositionUnavailable
    );
    assert_eq!(
        service
            .admin_add(KEY, p(1), Team::Red, PieceKind::Leader, now)
            .unwrap_err(),
        EngineError::AlreadySignedUp
    );
}
