//! Signup assignment tests through the orchestrator.
//!
//! These cover the preference cascade and the fairness ordering as seen by
//! a joining participant.

#![allow(clippy::unwrap_used)]

use splash_engine::{
    GameMode, MemoryStore, ParticipantId, PieceKind, PreferenceNote, RecordingScheduler,
    SessionKey, SessionService, SignupPreferences, Store, Team, Timestamp,
};

type Service = SessionService<MemoryStore, RecordingScheduler>;

const KEY: SessionKey = SessionKey::new(5);

fn p(id: u64) -> ParticipantId {
    ParticipantId::new(id)
}

fn now() -> Timestamp {
    Timestamp::from_millis(0)
}

fn service_with_game(mode: GameMode) -> Service {
    let mut service = SessionService::new(MemoryStore::new(), RecordingScheduler::new());
    service.create_game(KEY, mode, true, None).unwrap();
    service
}

fn prefs(team: Option<Team>, role: Option<PieceKind>) -> SignupPreferences {
    SignupPreferences { team, role }
}

#[test]
fn test_exact_preference_honored() {
    let mut service = service_with_game(GameMode::Splash3);

    let report = service
        .signup(KEY, p(1), prefs(Some(Team::Red), Some(PieceKind::Leader)), now())
        .unwrap();
    assert_eq!(report.outcome.team, Team::Red);
    assert_eq!(report.outcome.kind, PieceKind::Leader);
    assert_eq!(report.outcome.note, PreferenceNote::Honored);
}

#[test]
fn test_role_fallback_stays_on_preferred_team() {
    let mut service = service_with_game(GameMode::Splash3);
    service
        .admin_add(KEY, p(1), Team::Red, PieceKind::Leader, now())
        .unwrap();

    let report = service
        .signup(KEY, p(2), prefs(Some(Team::Red), Some(PieceKind::Leader)), now())
        .unwrap();
    assert_eq!(report.outcome.team, Team::Red);
    assert_eq!(report.outcome.kind, PieceKind::Colorer);
    assert_eq!(report.outcome.note, PreferenceNote::RoleUnavailable);
}

#[test]
fn test_team_fallback_keeps_preferred_role() {
    let mut service = service_with_game(GameMode::Splash3);
    service
        .admin_add(KEY, p(1), Team::Red, PieceKind::Leader, now())
        .unwrap();
    service
        .admin_add(KEY, p(2), Team::Red, PieceKind::Colorer, now())
        .unwrap();
    // Red is down to one colorer; a leader seat exists only elsewhere.
    let mut session = service.store().get_session(KEY).unwrap().unwrap();
    session
        .roster
        .pieces
        .iter_mut()
        .filter(|piece| piece.team == Team::Red && piece.owner.is_none())
        .for_each(|piece| piece.owner = Some(p(3)));
    let mut store = MemoryStore::new();
    store.put_session(KEY, &session).unwrap();
    let mut service = SessionService::new(store, RecordingScheduler::new());

    let report = service
        .signup(KEY, p(4), prefs(Some(Team::Red), Some(PieceKind::Leader)), now())
        .unwrap();
    assert_eq!(report.outcome.kind, PieceKind::Leader);
    assert_ne!(report.outcome.team, Team::Red);
    assert_eq!(report.outcome.note, PreferenceNote::TeamUnavailable);
}

#[test]
fn test_nothing_honored_falls_back_to_fairness() {
    let mut service = service_with_game(GameMode::Splash3);
    // Claim every leader and fill the rest of red.
    let mut session = service.store().get_session(KEY).unwrap().unwrap();
    let mut next = 100;
    for piece in &mut session.roster.pieces {
        if piece.kind == PieceKind::Leader || piece.team == Team::Red {
            piece.owner = Some(p(next));
            next += 1;
        }
    }
    let mut store = MemoryStore::new();
    store.put_session(KEY, &session).unwrap();
    let mut service = SessionService::new(store, RecordingScheduler::new());

    let report = service
        .signup(KEY, p(1), prefs(Some(Team::Red), Some(PieceKind::Leader)), now())
        .unwrap();
    assert_eq!(report.outcome.kind, PieceKind::Colorer);
    assert_ne!(report.outcome.team, Team::Red);
    assert_eq!(report.outcome.note, PreferenceNote::NothingHonored);
}

#[test]
fn test_fairness_balances_teams() {
    let mut service = service_with_game(GameMode::Splash3);

    for id in 1..=9 {
        service
            .signup(KEY, p(id), SignupPreferences::default(), now())
            .unwrap();
    }

    let session = service.store().get_session(KEY).unwrap().unwrap();
    assert!(session.roster.is_full());
    for team in [Team::Blue, Team::Red, Team::Green] {
        let claimed = session
            .roster
            .pieces
            .iter()
            .filter(|piece| piece.team == team && piece.owner.is_some())
            .count();
        assert_eq!(claimed, 3, "{team} should fill evenly");
    }
}

#[test]
fn test_no_preference_counts_as_honored() {
    let mut service = service_with_game(GameMode::Splash3);

    let report = service
        .signup(KEY, p(1), SignupPreferences::default(), now())
        .unwrap();
    assert_eq!(report.outcome.note, PreferenceNote::Honored);
}

#[test]
fn test_same_seed_assigns_identically() {
    let run = || {
        let mut service = service_with_game(GameMode::Splash4);
        let mut picks = Vec::new();
        for id in 1..=12 {
            let report = service
                .signup(KEY, p(id), SignupPreferences::default(), now())
                .unwrap();
            picks.push((report.outcome.team, report.outcome.kind));
        }
        picks
    };

    assert_eq!(run(), run());
}
