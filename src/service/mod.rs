//! The session orchestrator: one operation per user command.
//!
//! Each operation follows the same shape: read the whole session from the
//! store, validate, mutate the in-memory copy through the engine, write the
//! whole session back, then update profiles and schedule follow-ups. Nothing
//! is held across a reply wait — two-phase resolutions reload and re-validate
//! from scratch, using the session generation to detect a recreated game.

use tracing::{debug, info};

use crate::catalog::{AbilityKind, Catalog, GameMode, PieceKind};
use crate::core::{
    CellPos, Direction, DurationMs, EngineError, GameRng, ParticipantId, SessionKey, Team,
    Timestamp,
};
use crate::engine::{
    self, evaluate_win, MenuKind, MenuTarget, TargetKind, WinReport,
};
use crate::profile::Profile;
use crate::roster::{assign, SignupOutcome, SignupPreferences};
use crate::session::Session;
use crate::store::{ScheduledTask, Scheduler, Store};

/// How long a two-phase ability waits for its reply.
pub const REPLY_WINDOW: DurationMs = DurationMs::from_secs(30);

/// Fewest claimed pieces any game can start with.
pub const MIN_PLAYERS: u32 = 2;

const DAY_MS: i64 = 86_400_000;
const NOON_MS: i64 = DAY_MS / 2;

/// What a successful gameplay action did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionDetail {
    Splashed { cells: u32 },
    Bucketed { cells: u32 },
    Shot { target: CellPos, cells: u32 },
    Teleported { destination: CellPos, distance: u32 },
    Moved { direction: Direction, distance: u32 },
    Stunned { target: ParticipantId, until: Timestamp },
    Healed { target: ParticipantId, immune_until: Timestamp },
}

/// Result of a completed gameplay action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionReport {
    pub detail: ActionDetail,
    pub cooldown_until: Timestamp,
    /// Set when this action ended the game; the session has been reset.
    pub win: Option<WinReport>,
}

/// Phase-1 handle for a targeted ability (shoot, teleport).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetPrompt {
    pub key: SessionKey,
    pub actor: ParticipantId,
    pub kind: TargetKind,
    pub center: CellPos,
    pub range: u32,
    pub max_index: u32,
    pub deadline: Timestamp,
    pub generation: u64,
}

/// Phase-1 handle for a menu ability (stun, heal).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectPrompt {
    pub key: SessionKey,
    pub actor: ParticipantId,
    pub kind: MenuKind,
    pub options: Vec<MenuTarget>,
    pub deadline: Timestamp,
    pub generation: u64,
}

/// Result of `use_ability`: done immediately, or awaiting a reply.
#[derive(Clone, Debug, PartialEq)]
pub enum AbilityOutcome {
    Applied(ActionReport),
    AwaitTarget(TargetPrompt),
    AwaitSelection(SelectPrompt),
}

/// Result of `create_game`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreateReport {
    pub mode: GameMode,
    /// An active game was discarded to make room.
    pub replaced_active: bool,
}

/// Result of `start_game`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartReport {
    pub players: u32,
    pub recommended: u32,
    /// Started with fewer players than the mode is designed for.
    pub below_recommended: bool,
}

/// Result of a signup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignupReport {
    pub outcome: SignupOutcome,
    /// Set when this signup filled the roster: signups closed and an
    /// auto-start check was scheduled for this time.
    pub auto_start_at: Option<Timestamp>,
}

/// Result of an admin roster change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RosterChange {
    /// Signups were closed (roster filled) or reopened (spot freed).
    pub signups_now_open: bool,
    /// The change happened while a game was running.
    pub mid_game: bool,
}

/// A participant's cooldown timers, for display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CooldownStatus {
    pub action: Option<DurationMs>,
    pub stunned: Option<DurationMs>,
    pub immunity: Option<DurationMs>,
}

/// What a fired scheduled task did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Tell this participant their cooldown is over.
    Notify(ParticipantId),
    /// The auto-start check started the game.
    Started { players: u32, recommended: u32 },
    /// Stale or no longer applicable; nothing happened.
    Suppressed,
}

/// The orchestrator, generic over its persistence and scheduling
/// collaborators.
pub struct SessionService<S: Store, C: Scheduler> {
    store: S,
    scheduler: C,
    catalog: Catalog,
}

impl<S: Store, C: Scheduler> SessionService<S, C> {
    pub fn new(store: S, scheduler: C) -> Self {
        Self {
            store,
            scheduler,
            catalog: Catalog::builtin(),
        }
    }

    /// The static catalog, for rendering and autocompletion.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Access the store, primarily for tests and rendering.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Drain-style access to the scheduler.
    pub fn scheduler_mut(&mut self) -> &mut C {
        &mut self.scheduler
    }

    /// Load the session, creating an empty one on first interaction.
    ///
    /// The session key doubles as the RNG seed for a fresh session, so the
    /// whole lifecycle is reproducible from the persisted state alone.
    pub fn ensure_session(&mut self, key: SessionKey) -> Result<Session, EngineError> {
        if let Some(session) = self.store.get_session(key)? {
            return Ok(session);
        }
        let session = Session::empty(key.0);
        self.store.put_session(key, &session)?;
        Ok(session)
    }

    /// Load a profile, creating one on first interaction.
    pub fn ensure_profile(
        &mut self,
        id: ParticipantId,
        now: Timestamp,
    ) -> Result<Profile, EngineError> {
        if let Some(profile) = self.store.get_profile(id)? {
            return Ok(profile);
        }
        let profile = Profile::new(now);
        self.store.put_profile(id, &profile)?;
        Ok(profile)
    }

    /// Record that a participant interacted at `now`.
    pub fn touch_profile(
        &mut self,
        id: ParticipantId,
        now: Timestamp,
    ) -> Result<(), EngineError> {
        let mut profile = self.ensure_profile(id, now)?;
        profile.touch(now);
        self.store.put_profile(id, &profile)?;
        Ok(())
    }

    /// Whether a game is currently running.
    pub fn is_active(&mut self, key: SessionKey) -> Result<bool, EngineError> {
        Ok(self.ensure_session(key)?.active)
    }

    fn bump_stats(
        &mut self,
        id: ParticipantId,
        now: Timestamp,
        ability: bool,
    ) -> Result<(), EngineError> {
        let mut profile = self.ensure_profile(id, now)?;
        profile.stats.actions_taken += 1;
        if ability {
            profile.stats.abilities_used += 1;
        }
        profile.touch(now);
        self.store.put_profile(id, &profile)?;
        Ok(())
    }

    /// Check for a win; on one, credit statistics and reset the session.
    ///
    /// Called with the mutated session before it is persisted, so the reset
    /// and the winning move land in the same write.
    fn settle_win(
        &mut self,
        session: &mut Session,
        now: Timestamp,
    ) -> Result<Option<WinReport>, EngineError> {
        let Some(report) = evaluate_win(session) else {
            return Ok(None);
        };

        info!(team = %report.team, "game won");
        for piece in &session.roster.pieces {
            let Some(owner) = piece.owner else { continue };
            let mut profile = self.ensure_profile(owner, now)?;
            profile.stats.games_played += 1;
            if piece.team == report.team {
                profile.stats.games_won += 1;
            }
            self.store.put_profile(owner, &profile)?;
        }
        session.reset();
        Ok(Some(report))
    }

    fn schedule_reminder(
        &mut self,
        key: SessionKey,
        participant: ParticipantId,
        at: Timestamp,
        generation: u64,
    ) {
        self.scheduler.schedule_at(
            at,
            ScheduledTask::CooldownReminder {
                key,
                participant,
                generation,
            },
        );
    }

    /// Create (or recreate) a game from a mode template.
    pub fn create_game(
        &mut self,
        key: SessionKey,
        mode: GameMode,
        signups_open: bool,
        cooldown: Option<DurationMs>,
    ) -> Result<CreateReport, EngineError> {
        let mut session = self.ensure_session(key)?;
        let replaced_active = session.active;
        session.create_from(&self.catalog, mode, signups_open, cooldown);
        self.store.put_session(key, &session)?;
        Ok(CreateReport {
            mode,
            replaced_active,
        })
    }

    /// Start the created game.
    pub fn start_game(
        &mut self,
        key: SessionKey,
        now: Timestamp,
    ) -> Result<StartReport, EngineError> {
        let mut session = self.ensure_session(key)?;
        let Some(template) = session.config.as_ref() else {
            return Err(EngineError::NoGame);
        };
        if session.active {
            return Err(EngineError::AlreadyActive);
        }
        let players = session.roster.claimed_count();
        if players < MIN_PLAYERS {
            return Err(EngineError::TooFewPlayers {
                minimum: MIN_PLAYERS,
            });
        }
        let recommended = template.recommended_players;

        session.active = true;
        session.signups_open = false;
        session.started = Some(now);
        self.store.put_session(key, &session)?;

        info!(%key, players, "game started");
        Ok(StartReport {
            players,
            recommended,
            below_recommended: players < recommended,
        })
    }

    /// Join the game, honoring preferences as far as the roster allows.
    pub fn signup(
        &mut self,
        key: SessionKey,
        participant: ParticipantId,
        prefs: SignupPreferences,
        now: Timestamp,
    ) -> Result<SignupReport, EngineError> {
        let mut session = self.ensure_session(key)?;
        if session.config.is_none() {
            return Err(EngineError::NoGame);
        }
        if session.active {
            return Err(EngineError::AlreadyActive);
        }
        if !session.signups_open {
            return Err(EngineError::SignupsClosed);
        }
        if session.roster.piece_of(participant).is_some() {
            return Err(EngineError::AlreadySignedUp);
        }

        let mut rng = GameRng::from_state(&session.rng);
        let outcome = assign(&mut session.roster, participant, prefs, &mut rng)
            .ok_or(EngineError::RosterFull)?;
        session.rng = rng.state();

        let mut auto_start_at = None;
        if outcome.roster_filled {
            session.signups_open = false;
            let at = next_noon(now);
            self.scheduler.schedule_at(
                at,
                ScheduledTask::AutoStart {
                    key,
                    generation: session.generation,
                },
            );
            auto_start_at = Some(at);
        }

        self.store.put_session(key, &session)?;
        self.touch_profile(participant, now)?;
        Ok(SignupReport {
            outcome,
            auto_start_at,
        })
    }

    /// Give up a claimed piece. Not allowed once the game is running;
    /// mid-game removals go through `admin_remove`.
    pub fn leave(
        &mut self,
        key: SessionKey,
        participant: ParticipantId,
    ) -> Result<RosterChange, EngineError> {
        if self.ensure_session(key)?.active {
            return Err(EngineError::AlreadyActive);
        }
        self.release(key, participant)
    }

    fn release(
        &mut self,
        key: SessionKey,
        participant: ParticipantId,
    ) -> Result<RosterChange, EngineError> {
        let mut session = self.ensure_session(key)?;
        if !session.roster.unclaim(participant) {
            return Err(EngineError::NotParticipant);
        }
        let mid_game = session.active;
        if !session.active && !session.roster.is_full() {
            session.signups_open = true;
        }
        let signups_now_open = session.signups_open;
        self.store.put_session(key, &session)?;
        Ok(RosterChange {
            signups_now_open,
            mid_game,
        })
    }

    /// Admin: place a participant on an exact team and role.
    pub fn admin_add(
        &mut self,
        key: SessionKey,
        target: ParticipantId,
        team: Team,
        kind: PieceKind,
        now: Timestamp,
    ) -> Result<RosterChange, EngineError> {
        let mut session = self.ensure_session(key)?;
        if session.config.is_none() {
            return Err(EngineError::NoGame);
        }
        if session.roster.piece_of(target).is_some() {
            return Err(EngineError::AlreadySignedUp);
        }

        let slot = session
            .roster
            .pieces
            .iter_mut()
            .find(|p| p.owner.is_none() && p.team == team && p.kind == kind)
            .ok_or(EngineError::PositionUnavailable)?;
        slot.owner = Some(target);

        let mid_game = session.active;
        if !session.active && session.roster.is_full() {
            session.signups_open = false;
        }
        let signups_now_open = session.signups_open;
        self.store.put_session(key, &session)?;
        self.touch_profile(target, now)?;
        Ok(RosterChange {
            signups_now_open,
            mid_game,
        })
    }

    /// Admin: remove a participant from the roster.
    pub fn admin_remove(
        &mut self,
        key: SessionKey,
        target: ParticipantId,
    ) -> Result<RosterChange, EngineError> {
        self.release(key, target)
    }

    /// Admin: open or close signups. Meaningless once the game is running.
    pub fn set_signups(&mut self, key: SessionKey, open: bool) -> Result<(), EngineError> {
        let mut session = self.ensure_session(key)?;
        if session.config.is_none() {
            return Err(EngineError::NoGame);
        }
        if session.active {
            return Err(EngineError::AlreadyActive);
        }
        session.signups_open = open;
        self.store.put_session(key, &session)?;
        Ok(())
    }

    /// Admin: change the base action cooldown.
    ///
    /// Returns whether a game was running; existing cooldowns are not
    /// recomputed, only future ones use the new base.
    pub fn set_cooldown(
        &mut self,
        key: SessionKey,
        cooldown: DurationMs,
    ) -> Result<bool, EngineError> {
        let mut session = self.ensure_session(key)?;
        if session.config.is_none() {
            return Err(EngineError::NoGame);
        }
        session.cooldown = cooldown;
        let mid_game = session.active;
        self.store.put_session(key, &session)?;
        Ok(mid_game)
    }

    /// Move the actor's piece.
    pub fn move_piece(
        &mut self,
        key: SessionKey,
        actor: ParticipantId,
        direction: Direction,
        distance: u32,
        now: Timestamp,
    ) -> Result<ActionReport, EngineError> {
        let mut session = self.ensure_session(key)?;
        let report = engine::move_piece(&mut session, actor, direction, distance, now)?;
        let generation = session.generation;
        let win = self.settle_win(&mut session, now)?;
        self.store.put_session(key, &session)?;

        self.bump_stats(actor, now, false)?;
        if win.is_none() {
            self.schedule_reminder(key, actor, report.cooldown_until, generation);
        }
        Ok(ActionReport {
            detail: ActionDetail::Moved {
                direction: report.direction,
                distance: report.distance,
            },
            cooldown_until: report.cooldown_until,
            win,
        })
    }

    /// Use an ability: immediate ones resolve now, two-phase ones hand back
    /// a prompt to be resolved within [`REPLY_WINDOW`].
    pub fn use_ability(
        &mut self,
        key: SessionKey,
        actor: ParticipantId,
        kind: AbilityKind,
        now: Timestamp,
    ) -> Result<AbilityOutcome, EngineError> {
        match kind {
            AbilityKind::Splash | AbilityKind::Bucket => {
                let mut session = self.ensure_session(key)?;
                let report = engine::resolve_immediate(&mut session, actor, kind, now)?;
                let generation = session.generation;
                let win = self.settle_win(&mut session, now)?;
                self.store.put_session(key, &session)?;

                self.bump_stats(actor, now, true)?;
                if win.is_none() {
                    self.schedule_reminder(key, actor, report.cooldown_until, generation);
                }
                let detail = match kind {
                    AbilityKind::Splash => ActionDetail::Splashed {
                        cells: report.cells,
                    },
                    _ => ActionDetail::Bucketed {
                        cells: report.cells,
                    },
                };
                Ok(AbilityOutcome::Applied(ActionReport {
                    detail,
                    cooldown_until: report.cooldown_until,
                    win,
                }))
            }
            AbilityKind::Shoot | AbilityKind::Teleport => {
                let session = self.ensure_session(key)?;
                let target_kind = if kind == AbilityKind::Shoot {
                    TargetKind::Shoot
                } else {
                    TargetKind::Teleport
                };
                let data = engine::prompt_target(&session, actor, target_kind, now)?;
                Ok(AbilityOutcome::AwaitTarget(TargetPrompt {
                    key,
                    actor,
                    kind: target_kind,
                    center: data.center,
                    range: data.range,
                    max_index: data.max_index,
                    deadline: now.plus(REPLY_WINDOW),
                    generation: session.generation,
                }))
            }
            AbilityKind::Stun | AbilityKind::Heal => {
                let session = self.ensure_session(key)?;
                let menu_kind = if kind == AbilityKind::Stun {
                    MenuKind::Stun
                } else {
                    MenuKind::Heal
                };
                let options = engine::prompt_menu(&session, actor, menu_kind, now)?;
                Ok(AbilityOutcome::AwaitSelection(SelectPrompt {
                    key,
                    actor,
                    kind: menu_kind,
                    options,
                    deadline: now.plus(REPLY_WINDOW),
                    generation: session.generation,
                }))
            }
        }
    }

    /// Phase 2 of a targeted ability.
    ///
    /// Everything is re-validated against the freshly loaded session; the
    /// prompt's snapshot is used for nothing but the deadline and generation.
    pub fn resolve_target(
        &mut self,
        prompt: &TargetPrompt,
        cell_index: u32,
        now: Timestamp,
    ) -> Result<ActionReport, EngineError> {
        if now.is_after(prompt.deadline) {
            return Err(EngineError::Expired);
        }
        let mut session = self.ensure_session(prompt.key)?;
        if session.generation != prompt.generation {
            debug!(key = %prompt.key, "target resolution against a recreated session");
            return Err(EngineError::SessionChanged);
        }

        let (detail, cooldown_until, counts_as_ability) = match prompt.kind {
            TargetKind::Shoot => {
                let report =
                    engine::resolve_shoot(&mut session, prompt.actor, cell_index, now)?;
                (
                    ActionDetail::Shot {
                        target: report.target,
                        cells: report.cells,
                    },
                    report.cooldown_until,
                    true,
                )
            }
            TargetKind::Teleport => {
                let report =
                    engine::resolve_teleport(&mut session, prompt.actor, cell_index, now)?;
                (
                    ActionDetail::Teleported {
                        destination: report.destination,
                        distance: report.distance,
                    },
                    report.cooldown_until,
                    false,
                )
            }
        };

        let generation = session.generation;
        let win = self.settle_win(&mut session, now)?;
        self.store.put_session(prompt.key, &session)?;

        self.bump_stats(prompt.actor, now, counts_as_ability)?;
        if win.is_none() {
            self.schedule_reminder(prompt.key, prompt.actor, cooldown_until, generation);
        }
        Ok(ActionReport {
            detail,
            cooldown_until,
            win,
        })
    }

    /// Phase 2 of a menu ability.
    pub fn resolve_selection(
        &mut self,
        prompt: &SelectPrompt,
        target: ParticipantId,
        now: Timestamp,
    ) -> Result<ActionReport, EngineError> {
        if now.is_after(prompt.deadline) {
            return Err(EngineError::Expired);
        }
        let mut session = self.ensure_session(prompt.key)?;
        if session.generation != prompt.generation {
            debug!(key = %prompt.key, "menu resolution against a recreated session");
            return Err(EngineError::SessionChanged);
        }

        let generation = session.generation;
        let (detail, cooldown_until, target_reminder) = match prompt.kind {
            MenuKind::Stun => {
                let report = engine::resolve_stun(&mut session, prompt.actor, target, now)?;
                (
                    ActionDetail::Stunned {
                        target: report.target,
                        until: report.stunned_until,
                    },
                    report.cooldown_until,
                    Some(report.stunned_until),
                )
            }
            MenuKind::Heal => {
                let report = engine::resolve_heal(&mut session, prompt.actor, target, now)?;
                (
                    ActionDetail::Healed {
                        target: report.target,
                        immune_until: report.immune_until,
                    },
                    report.cooldown_until,
                    None,
                )
            }
        };

        let win = self.settle_win(&mut session, now)?;
        self.store.put_session(prompt.key, &session)?;

        self.bump_stats(prompt.actor, now, true)?;
        if win.is_none() {
            self.schedule_reminder(prompt.key, prompt.actor, cooldown_until, generation);
            if let Some(at) = target_reminder {
                self.schedule_reminder(prompt.key, target, at, generation);
            }
        }
        Ok(ActionReport {
            detail,
            cooldown_until,
            win,
        })
    }

    /// A participant's remaining cooldowns, for display.
    pub fn cooldown_status(
        &mut self,
        key: SessionKey,
        participant: ParticipantId,
        now: Timestamp,
    ) -> Result<CooldownStatus, EngineError> {
        let session = self.ensure_session(key)?;
        let piece = session
            .roster
            .piece_of(participant)
            .ok_or(EngineError::NotParticipant)?;
        Ok(CooldownStatus {
            action: piece.cooldowns.action_remaining(now),
            stunned: piece.cooldowns.stunned_remaining(now),
            immunity: piece.cooldowns.immunity_remaining(now),
        })
    }

    /// Toggle the cooldown-expiry notification preference.
    pub fn set_cooldown_ping(
        &mut self,
        id: ParticipantId,
        enabled: bool,
        now: Timestamp,
    ) -> Result<(), EngineError> {
        let mut profile = self.ensure_profile(id, now)?;
        profile.cooldown_ping = enabled;
        profile.touch(now);
        self.store.put_profile(id, &profile)?;
        Ok(())
    }

    /// Set the three-letter display nickname.
    pub fn set_nickname(
        &mut self,
        id: ParticipantId,
        nickname: &str,
        now: Timestamp,
    ) -> Result<(), EngineError> {
        let mut profile = self.ensure_profile(id, now)?;
        profile.set_nickname(nickname)?;
        profile.touch(now);
        self.store.put_profile(id, &profile)?;
        Ok(())
    }

    /// Remove the display nickname.
    pub fn clear_nickname(
        &mut self,
        id: ParticipantId,
        now: Timestamp,
    ) -> Result<(), EngineError> {
        let mut profile = self.ensure_profile(id, now)?;
        profile.clear_nickname();
        profile.touch(now);
        self.store.put_profile(id, &profile)?;
        Ok(())
    }

    /// A participant's cumulative statistics.
    pub fn player_stats(
        &mut self,
        id: ParticipantId,
        now: Timestamp,
    ) -> Result<Profile, EngineError> {
        self.ensure_profile(id, now)
    }

    /// Run a fired scheduled task against fresh state.
    ///
    /// Stale tasks — wrong generation, game over, conditions no longer
    /// holding — are suppressed, never errors.
    pub fn handle_task(
        &mut self,
        task: ScheduledTask,
        now: Timestamp,
    ) -> Result<TaskOutcome, EngineError> {
        match task {
            ScheduledTask::CooldownReminder {
                key,
                participant,
                generation,
            } => {
                let session = self.ensure_session(key)?;
                if !session.active || session.signups_open || session.generation != generation {
                    debug!(%key, %participant, "cooldown reminder suppressed");
                    return Ok(TaskOutcome::Suppressed);
                }
                let profile = self.ensure_profile(participant, now)?;
                if !profile.cooldown_ping {
                    return Ok(TaskOutcome::Suppressed);
                }
                let Some(piece) = session.roster.piece_of(participant) else {
                    return Ok(TaskOutcome::Suppressed);
                };
                if !piece.cooldowns.clear(now) {
                    debug!(%participant, "cooldown reminder fired early, suppressed");
                    return Ok(TaskOutcome::Suppressed);
                }
                Ok(TaskOutcome::Notify(participant))
            }
            ScheduledTask::AutoStart { key, generation } => {
                let mut session = self.ensure_session(key)?;
                if session.active || session.signups_open || session.generation != generation {
                    debug!(%key, "auto-start suppressed");
                    return Ok(TaskOutcome::Suppressed);
                }
                let Some(template) = session.config.as_ref() else {
                    return Ok(TaskOutcome::Suppressed);
                };
                let recommended = template.recommended_players;
                let players = session.roster.claimed_count();
                if players < recommended || players < MIN_PLAYERS {
                    return Ok(TaskOutcome::Suppressed);
                }

                session.active = true;
                session.signups_open = false;
                session.started = Some(now);
                self.store.put_session(key, &session)?;

                info!(%key, players, "game auto-started");
                Ok(TaskOutcome::Started {
                    players,
                    recommended,
                })
            }
        }
    }
}

/// The next 12:00 UTC boundary strictly after `now`.
fn next_noon(now: Timestamp) -> Timestamp {
    let day_start = now.millis().div_euclid(DAY_MS) * DAY_MS;
    let today_noon = day_start + NOON_MS;
    if today_noon > now.millis() {
        Timestamp::from_millis(today_noon)
    } else {
        Timestamp::from_millis(today_noon + DAY_MS)
    }
}
