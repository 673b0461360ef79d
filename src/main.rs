//! Slemmings entry point
//!
//! Headless native runner: plays one level at the configured speed, optionally
//! assigning a skill to every slemming as it drops in, and logs the HUD
//! counters until the level is won or lost.
//!
//! Usage: `slemmings [LEVEL_ID | LEVEL.json] [SKILL] [SPEED]`

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::init();
    log::info!("Slemmings (native, headless) starting...");

    match native::run(std::env::args().skip(1).collect()) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            std::process::ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front end; the library is driven by the host page
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::collections::VecDeque;
    use std::error::Error;
    use std::fs;
    use std::path::Path;

    use slemmings::consts::*;
    use slemmings::level::builtin_level;
    use slemmings::sim::{AgentId, GamePhase, GameState, Skill, TickInput, run_frame};
    use slemmings::{AdviceSource, CannedAdvice, LevelDescriptor, Settings, SpeedPreset};

    const SETTINGS_PATH: &str = "slemmings_settings.json";
    /// Give up after this many frames even if the level is still running
    const MAX_FRAMES: u32 = 200_000;
    /// HUD log cadence
    const HUD_EVERY_FRAMES: u32 = 600;

    pub fn run(args: Vec<String>) -> Result<(), Box<dyn Error>> {
        let mut settings = Settings::load(Path::new(SETTINGS_PATH));

        let level = match args.first() {
            Some(arg) => load_level(arg)?,
            None => builtin_level(settings.start_level)
                .ok_or_else(|| format!("no built-in level {}", settings.start_level))?,
        };
        let skill = match args.get(1) {
            Some(name) => {
                let skill = Skill::from_str(name);
                Some(skill.ok_or_else(|| format!("unknown skill {:?}", name))?)
            }
            None => None,
        };
        if let Some(name) = args.get(2) {
            settings.speed = SpeedPreset::from_str(name)
                .ok_or_else(|| format!("unknown speed {:?}", name))?;
        }

        let mut state = GameState::new(level);
        let ticks = settings.ticks_per_frame();
        log::info!(
            "Playing \"{}\" at {} speed ({} ticks/frame)",
            state.level.name,
            settings.speed.as_str(),
            ticks
        );
        if let Some(skill) = skill
            && settings.skill_tooltips
        {
            log::info!("Armed {}: {}", skill.as_str(), skill.description());
        }

        let mut input = TickInput {
            arm: skill,
            ..Default::default()
        };
        let mut pending: VecDeque<AgentId> = VecDeque::new();
        let mut frames = 0;

        while !state.is_finished() && frames < MAX_FRAMES {
            input.click = next_click(&state, skill, &mut pending);
            if settings.show_reticle
                && let Some(pointer) = input.click
                && let Some(id) = state.find_target(pointer)
            {
                log::debug!("Reticle on {:?} at {}", id, pointer);
            }

            let report = run_frame(&mut state, &input, ticks, SIM_DT);
            input = TickInput::default();
            frames += 1;

            pending.extend(report.spawned.iter().copied());
            pending.retain(|id| !report.assigned.contains(id));

            if frames % HUD_EVERY_FRAMES == 0 {
                log_hud(&state);
            }
        }

        if !state.is_finished() {
            state.nuke();
        }
        log_hud(&state);
        let won = state.phase == GamePhase::Won;
        let outcome = if won { "won" } else { "lost" };
        log::info!("Level \"{}\" {}", state.level.name, outcome);

        if settings.show_advice && !won {
            let mut source = CannedAdvice::new(settings.advice_seed);
            let advice = source.advice(&state.level.name, &state.stats);
            log::info!("Slime Lord says: {}", advice);
        }
        Ok(())
    }

    fn load_level(arg: &str) -> Result<LevelDescriptor, Box<dyn Error>> {
        if let Ok(id) = arg.parse::<u32>() {
            let Some(level) = builtin_level(id) else {
                return Err(format!("no built-in level {}", id).into());
            };
            return Ok(level);
        }
        let json = fs::read_to_string(arg)?;
        Ok(LevelDescriptor::from_json(&json)?)
    }

    /// Pointer position for the oldest slemming still waiting for the skill
    fn next_click(
        state: &GameState,
        skill: Option<Skill>,
        pending: &mut VecDeque<AgentId>,
    ) -> Option<glam::Vec2> {
        let skill = skill?;
        if state.skills_left(skill) == 0 {
            pending.clear();
            return None;
        }
        while let Some(&id) = pending.front() {
            match state.slemming(id) {
                Some(s) if !s.is_terminal() => return Some(s.pos),
                _ => {
                    pending.pop_front();
                }
            }
        }
        None
    }

    fn log_hud(state: &GameState) {
        log::info!(
            "t={:.1}s released {}/{} saved {}/{} dead {} rate {}",
            state.time_left,
            state.stats.released,
            state.level.total_slemmings,
            state.stats.saved,
            state.level.to_save,
            state.stats.dead,
            state.release_rate
        );
    }
}
