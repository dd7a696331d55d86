//! Character-generation sessions.
//!
//! A `ChargenSession` drives one character's run through Start, Reroll,
//! Choose, Finish and Reset. The persisted blob is the only state: every
//! operation loads it, works in memory, and writes it back once at the end.
//! A failed operation writes nothing.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, error, info};

use lw_core::{CharacterStore, Notification, Notifier, SkillProgression, TableProvider};

use crate::apply::{Draft, DraftUpdates, RewardApplier};
use crate::config::{AttributeKeys, ChargenConfig, ChargenSetup};
use crate::draw::pick_weighted;
use crate::error::{ChargenError, ChargenResult};
use crate::gate::clamp_status;
use crate::offer::{Card, assemble_offer};
use crate::run::{ChargenState, HistoryEntry, Run, RunStatus, SessionPhase};
use crate::summary::Summary;

/// What a Choose led to.
#[derive(Debug, Clone, PartialEq)]
pub enum ChooseOutcome {
    /// The run moved on and a fresh offer is waiting.
    Advanced {
        /// Table the new offer was drawn from.
        table_ref: String,
        /// The new offer.
        cards: Vec<Card>,
    },
    /// The run ended.
    Finished(Summary),
}

/// A session handle for one character.
pub struct ChargenSession<'a> {
    character: &'a mut dyn CharacterStore,
    tables: &'a dyn TableProvider,
    skills: Option<&'a dyn SkillProgression>,
    notifier: Option<&'a dyn Notifier>,
    config: ChargenConfig,
    rng: StdRng,
}

impl<'a> ChargenSession<'a> {
    /// Open a session on `character`, drawing from `tables`.
    pub fn open(
        character: &'a mut dyn CharacterStore,
        tables: &'a dyn TableProvider,
        config: ChargenConfig,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            character,
            tables,
            skills: None,
            notifier: None,
            config,
            rng,
        }
    }

    /// Attach a skill-progression capability.
    pub fn with_skills(mut self, skills: &'a dyn SkillProgression) -> Self {
        self.skills = Some(skills);
        self
    }

    /// Attach an output channel for summaries and errors.
    pub fn with_notifier(mut self, notifier: &'a dyn Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// The persisted state.
    pub fn state(&self) -> ChargenResult<ChargenState> {
        ChargenState::load(&*self.character, &self.config.flag_scope)
    }

    /// The current phase.
    pub fn phase(&self) -> ChargenResult<SessionPhase> {
        Ok(self.state()?.phase())
    }

    /// Remember a setup without starting a run.
    pub fn configure(&mut self, setup: ChargenSetup) -> ChargenResult<()> {
        let result = self.try_configure(setup);
        self.surface("configure", result)
    }

    /// Start a new run, replacing any existing one.
    pub fn start(&mut self, setup: ChargenSetup) -> ChargenResult<Run> {
        let result = self.try_start(setup);
        self.surface("start", result)
    }

    /// Replace the current offer without spending a roll.
    pub fn reroll(&mut self) -> ChargenResult<Run> {
        let result = self.try_reroll();
        self.surface("reroll", result)
    }

    /// Commit the card at `index`.
    ///
    /// An index outside the offer, an exhausted budget, or a finished run
    /// ends the run with a summary instead of doing nothing.
    pub fn choose(&mut self, index: usize) -> ChargenResult<ChooseOutcome> {
        let result = self.try_choose(index);
        self.surface("choose", result)
    }

    /// End the run now and post its summary.
    pub fn finish(&mut self) -> ChargenResult<Summary> {
        let result = self.try_finish();
        self.surface("finish", result)
    }

    /// Discard the run and start over from the remembered setup.
    ///
    /// Returns `None` when there is no setup to restart from; the state is
    /// left in setup-only mode.
    pub fn reset(&mut self) -> ChargenResult<Option<Run>> {
        let result = self.try_reset();
        self.surface("reset", result)
    }

    fn try_configure(&mut self, setup: ChargenSetup) -> ChargenResult<()> {
        let state = ChargenState {
            setup: setup.normalized(),
            run: None,
        };
        self.save(&state, DraftUpdates::default())
    }

    fn try_start(&mut self, setup: ChargenSetup) -> ChargenResult<Run> {
        let setup = setup.normalized();
        let mut run = Run::new(&setup);
        let status = social_status(&*self.character, &self.config.keys);
        self.draw_offer(&mut run, status)?;

        info!(
            character = %self.character.name(),
            table = %run.current_table_ref,
            rolls = run.remaining_global_rolls,
            cards = run.offered_cards.len(),
            "chargen run started"
        );
        let state = ChargenState {
            setup,
            run: Some(run.clone()),
        };
        self.save(&state, DraftUpdates::default())?;
        Ok(run)
    }

    fn try_reroll(&mut self) -> ChargenResult<Run> {
        let mut state = self.state()?;
        let run = state.run.as_mut().ok_or(ChargenError::NoActiveRun)?;
        if run.is_finished() {
            return Err(ChargenError::RunFinished);
        }

        let status = social_status(&*self.character, &self.config.keys);
        self.draw_offer(run, status)?;
        debug!(
            table = %run.current_table_ref,
            cards = run.offered_cards.len(),
            "offer rerolled"
        );
        let run = run.clone();
        self.save(&state, DraftUpdates::default())?;
        Ok(run)
    }

    fn try_choose(&mut self, index: usize) -> ChargenResult<ChooseOutcome> {
        let mut state = self.state()?;
        let run = state.run.as_mut().ok_or(ChargenError::NoActiveRun)?;

        if run.is_finished() || run.remaining_global_rolls == 0 || index >= run.offered_cards.len()
        {
            debug!(
                index,
                offered = run.offered_cards.len(),
                remaining = run.remaining_global_rolls,
                "choice not playable, finishing run"
            );
            let summary = self.finish_run(&mut state, DraftUpdates::default())?;
            return Ok(ChooseOutcome::Finished(summary));
        }

        let card = run.offered_cards[index].clone();
        let choice = &card.choice;
        let table_ref = run.current_table_ref.clone();

        let mut draft = Draft::new(&*self.character);
        let applier = RewardApplier::new(self.tables, self.skills, &self.config);
        applier.add_bio(&mut draft, run, format!("Chose: {}", choice.title));
        if let Some(bio) = &choice.bio {
            applier.add_bio(&mut draft, run, bio.clone());
        }

        if choice.rewards.is_empty() {
            return Err(ChargenError::NoRewards(choice.title.clone()));
        }
        let reward = pick_weighted(&choice.rewards, &mut self.rng)
            .ok_or(ChargenError::NoRewardSelected)?
            .clone();
        applier.apply(&mut draft, run, &reward.changes, &mut self.rng)?;

        run.remaining_global_rolls = run.remaining_global_rolls.saturating_sub(1);
        run.remaining_here = run.remaining_here.saturating_sub(1);
        let next = choice.next_table(&reward).cloned();
        run.history.push(HistoryEntry {
            table_ref,
            choice_title: choice.title.clone(),
            reward_applied: reward,
            chosen_at: chrono::Utc::now(),
        });

        let status = social_status(&draft, &self.config.keys);
        let updates = draft.into_updates();

        info!(
            title = %choice.title,
            remaining = run.remaining_global_rolls,
            "choice applied"
        );

        let next = match next {
            Some(next) if run.remaining_global_rolls > 0 => next,
            _ => {
                let summary = self.finish_run(&mut state, updates)?;
                return Ok(ChooseOutcome::Finished(summary));
            }
        };

        debug!(from = %run.current_table_ref, to = %next.table_ref, "switching table");
        run.current_table_ref = next.table_ref;
        if next.rolls_override > 0 {
            run.remaining_here = next.rolls_override;
        }
        self.draw_offer(run, status)?;

        let outcome = ChooseOutcome::Advanced {
            table_ref: run.current_table_ref.clone(),
            cards: run.offered_cards.clone(),
        };
        self.save(&state, updates)?;
        Ok(outcome)
    }

    fn try_finish(&mut self) -> ChargenResult<Summary> {
        let mut state = self.state()?;
        if state.run.is_none() {
            return Err(ChargenError::NoActiveRun);
        }
        self.finish_run(&mut state, DraftUpdates::default())
    }

    fn try_reset(&mut self) -> ChargenResult<Option<Run>> {
        let setup = self.state()?.setup.normalized();
        let run = if setup.table_ref.is_empty() {
            self.save(
                &ChargenState {
                    setup,
                    run: None,
                },
                DraftUpdates::default(),
            )?;
            None
        } else {
            Some(self.try_start(setup)?)
        };
        info!(character = %self.character.name(), "chargen run reset");
        self.notify(Notification::Info("Character generation reset.".to_string()));
        Ok(run)
    }

    /// Mark the run finished, commit, and post the summary.
    fn finish_run(
        &mut self,
        state: &mut ChargenState,
        updates: DraftUpdates,
    ) -> ChargenResult<Summary> {
        let run = state.run.as_mut().ok_or(ChargenError::NoActiveRun)?;
        run.status = RunStatus::Finished;
        let summary = Summary::new(self.character.name(), run.biography.clone());
        self.save(state, updates)?;

        info!(
            character = %summary.character,
            lines = summary.biography.len(),
            "chargen run finished"
        );
        self.notify(Notification::Summary {
            speaker: summary.character.clone(),
            content: summary.export_markdown(),
        });
        self.notify(Notification::Info(
            "Character generation finished.".to_string(),
        ));
        Ok(summary)
    }

    fn draw_offer(&mut self, run: &mut Run, status: i64) -> ChargenResult<()> {
        let tables = self.tables;
        let table = tables
            .resolve_table(&run.current_table_ref)
            .ok_or_else(|| ChargenError::TableNotFound(run.current_table_ref.clone()))?;
        let offer = assemble_offer(
            table,
            run.choices_per_draw,
            status,
            run.lucky_streak,
            &mut self.rng,
        )?;
        run.offered_cards = offer.cards;
        run.gate_log = offer.misses;
        Ok(())
    }

    /// Write attributes in one batch, then the state blob.
    fn save(&mut self, state: &ChargenState, updates: DraftUpdates) -> ChargenResult<()> {
        let blob = state.to_value()?;
        if !updates.attributes.is_empty() {
            self.character.write_attributes(updates.attributes)?;
        }
        self.character.write_flag(&self.config.flag_scope, blob)?;
        Ok(())
    }

    fn notify(&self, notification: Notification) {
        if let Some(notifier) = self.notifier {
            notifier.post(notification);
        }
    }

    fn surface<T>(&self, op: &'static str, result: ChargenResult<T>) -> ChargenResult<T> {
        if let Err(e) = &result {
            error!(op, error = %e, "chargen operation failed");
            self.notify(Notification::Error(e.to_string()));
        }
        result
    }
}

/// Social status as the gate sees it.
fn social_status(store: &dyn CharacterStore, keys: &AttributeKeys) -> i64 {
    clamp_status(store.read_number(&keys.social_status, 0.0).round() as i64)
}
