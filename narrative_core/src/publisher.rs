//! Publisher - runs the simulation chapter by chapter and has the editor write it up.

use rand::seq::SliceRandom;
use rand::Rng;
use std::io::Write;
use story_world::ActorId;

use crate::agent::Stage;
use crate::config::StoryConfig;
use crate::editor::Editor;
use crate::error::{NarrativeError, Result};

/// Turns a cast, a setting and a configuration into a book.
#[derive(Debug, Clone)]
pub struct Publisher {
    config: StoryConfig,
    cast: Vec<ActorId>,
    setting: Vec<ActorId>,
}

impl Publisher {
    /// `cast` take turns in this order and are the point-of-view characters;
    /// each chapter opens with every one of them somewhere in `setting`.
    pub fn new(config: StoryConfig, cast: Vec<ActorId>, setting: Vec<ActorId>) -> Self {
        Self {
            config,
            cast,
            setting,
        }
    }

    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    /// Check everything a simulation relies on before starting one.
    pub fn validate<R: Rng>(&self, stage: &Stage<R>) -> Result<()> {
        self.config.validate()?;
        if self.cast.is_empty() {
            return Err(NarrativeError::NoPointOfView);
        }
        if self.setting.is_empty() {
            return Err(NarrativeError::EmptySetting);
        }
        for who in &self.cast {
            let actor = stage
                .world()
                .get(*who)
                .ok_or(story_world::WorldError::UnknownActor(*who))?;
            if !actor.is_animate() {
                return Err(NarrativeError::NotAnimate {
                    name: actor.name.clone(),
                });
            }
            if stage.mind(*who).is_none() {
                return Err(NarrativeError::NotACharacter {
                    name: actor.name.clone(),
                });
            }
        }
        stage.world().validate(&self.setting)?;
        Ok(())
    }

    /// Write the whole book to `out`.
    pub fn publish<R: Rng, W: Write>(&self, stage: &mut Stage<R>, out: &mut W) -> Result<()> {
        self.validate(stage)?;

        let title = &self.config.title;
        write!(out, "{}\n{}\n\n", title, "=".repeat(title.chars().count()))?;
        for chapter in 1..=self.config.chapters {
            write!(out, "Chapter {}.\n-----------\n\n", chapter)?;
            self.publish_chapter(stage, chapter, out)?;
        }
        Ok(())
    }

    /// Simulate one chapter until its quota is met, then edit it into prose.
    ///
    /// The configured weights are installed on `stage` first. Its random source is left
    /// alone; build it with [`Stage::from_config`] to honour the configured seed.
    pub fn publish_chapter<R: Rng, W: Write>(
        &self,
        stage: &mut Stage<R>,
        chapter: u32,
        out: &mut W,
    ) -> Result<()> {
        tracing::info!(chapter, title = %self.config.title, "simulating chapter");
        stage.set_weights(self.config.weights)?;
        stage.begin_chapter();

        for who in &self.cast {
            let (_, rng) = stage.world_and_rng();
            let location = self
                .setting
                .choose(rng)
                .copied()
                .ok_or(NarrativeError::EmptySetting)?;
            stage.place_in(*who, location);
        }

        let mut rounds = 0usize;
        while stage.events_logged() < self.config.events_per_chapter {
            for who in &self.cast {
                stage.live(*who);
            }
            rounds += 1;
        }

        let collector = stage.take_collector().unwrap_or_default();
        tracing::info!(chapter, rounds, events = collector.len(), "chapter simulated");
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!(log = %collector.dump(stage.world()), "chapter log");
            for who in &self.cast {
                tracing::debug!(mind = %stage.dump_mind(*who), "character state");
            }
        }

        let mut editor =
            Editor::new(collector, self.cast.clone())?.with_config(self.config.editor)?;
        let (world, rng) = stage.world_and_rng();
        editor.publish(world, rng, out)
    }
}
