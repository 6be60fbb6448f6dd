use std::sync::Arc;

use smallvec::SmallVec;

use crate::animation::action::AnimationAction;
use crate::animation::clip::{AnimationClip, Channel};
use crate::animation::library::{self, ClipLibrary};
use crate::animation::pose::Pose;
use crate::errors::{Result, WayfarerError};

/// Slack applied when comparing accumulated fade time against the fade
/// duration, so a fade made of several float deltas still completes on the
/// tick that nominally reaches it.
const FADE_EPSILON: f32 = 1e-5;

/// What the renderer needs to know about one playing action.
#[derive(Debug, Clone)]
pub struct ActionSnapshot {
    pub clip: Arc<AnimationClip>,
    pub time: f32,
    pub weight: f32,
}

impl ActionSnapshot {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.clip.name
    }
}

pub type ActionList = SmallVec<[ActionSnapshot; 2]>;

#[derive(Debug, Clone, Copy)]
struct Transition {
    from: usize,
    to: usize,
    elapsed: f32,
    duration: f32,
}

/// Plays one clip at a time and crossfades between clips.
///
/// Weights ramp linearly and complementarily: during a fade the outgoing
/// action has weight `1 - p` and the incoming one `p`, where `p` is the
/// fraction of the fade that has elapsed. A new request while a fade is in
/// flight replaces it; the old outgoing action is dropped and the fade
/// restarts from the old incoming action.
pub struct AnimationMixer {
    library: Arc<ClipLibrary>,
    actions: Vec<AnimationAction>,
    active: Option<usize>,
    transition: Option<Transition>,
}

impl AnimationMixer {
    #[must_use]
    pub fn new(library: Arc<ClipLibrary>) -> Self {
        Self {
            library,
            actions: Vec::new(),
            active: None,
            transition: None,
        }
    }

    #[must_use]
    pub fn library(&self) -> &Arc<ClipLibrary> {
        &self.library
    }

    /// Switches the animation state to `name`.
    ///
    /// Requesting the state that is already active is a no-op unless
    /// `force_restart` is set, in which case its local time rewinds to zero.
    /// Otherwise the target starts from its first frame and fades in over
    /// `fade_duration`; a zero fade, or no previously active action, switches
    /// instantly.
    ///
    /// Requesting the outgoing action of an unfinished fade reverses it: that
    /// action keeps its local time and both weights continue from where they
    /// are, so the blend never jumps.
    ///
    /// An unknown clip name falls back to the idle clip with a warning. Only a
    /// library without an idle clip makes this fail.
    pub fn request_state(&mut self, name: &str, fade_duration: f32, force_restart: bool) -> Result<()> {
        let index = match self.action_index(name) {
            Ok(index) => index,
            Err(err @ (WayfarerError::UnknownClip(_) | WayfarerError::InvalidClip { .. }))
                if name != library::IDLE =>
            {
                log::warn!("{err}; falling back to '{}'", library::IDLE);
                self.action_index(library::IDLE)?
            }
            Err(err) => return Err(err),
        };

        self.activate(index, fade_duration, force_restart);
        Ok(())
    }

    fn action_index(&mut self, name: &str) -> Result<usize> {
        if let Some(index) = self.actions.iter().position(|a| a.name() == name) {
            return Ok(index);
        }
        let clip = self.library.get_clip(name)?;
        self.actions.push(AnimationAction::new(clip));
        Ok(self.actions.len() - 1)
    }

    fn activate(&mut self, index: usize, fade_duration: f32, force_restart: bool) {
        if self.active == Some(index) {
            if force_restart {
                self.actions[index].reset();
            }
            return;
        }

        let previous = self.active;
        let reversed_from = match self.transition.take() {
            Some(old) if old.from == index => Some(old.to),
            Some(old) => {
                self.disable(old.from);
                None
            }
            None => None,
        };

        // Turning back to the outgoing action of a fade: keep its time and
        // resume the ramp from the weights it already has.
        if let Some(from) = reversed_from.filter(|_| fade_duration > 0.0) {
            if force_restart {
                self.actions[index].reset();
            }
            let weight = self.actions[index].weight;
            self.transition = Some(Transition {
                from,
                to: index,
                elapsed: weight * fade_duration,
                duration: fade_duration,
            });
            log::debug!(
                "Animation state -> '{}' (reversed fade at weight {weight:.3})",
                self.actions[index].name()
            );
            self.active = Some(index);
            return;
        }

        let target = &mut self.actions[index];
        target.reset();
        target.enabled = true;

        match previous {
            Some(from) if fade_duration > 0.0 => {
                self.actions[from].weight = 1.0;
                self.actions[index].weight = 0.0;
                self.transition = Some(Transition {
                    from,
                    to: index,
                    elapsed: 0.0,
                    duration: fade_duration,
                });
            }
            _ => {
                if let Some(from) = previous {
                    self.disable(from);
                }
                self.actions[index].weight = 1.0;
            }
        }

        log::debug!(
            "Animation state -> '{}' (fade {:.3}s)",
            self.actions[index].name(),
            fade_duration.max(0.0)
        );
        self.active = Some(index);
    }

    fn disable(&mut self, index: usize) {
        let action = &mut self.actions[index];
        action.enabled = false;
        action.weight = 0.0;
    }

    /// Advances every enabled action and the in-flight fade by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        for action in &mut self.actions {
            action.update(dt);
        }

        let Some(mut transition) = self.transition else {
            return;
        };

        transition.elapsed += dt;
        let done = transition.elapsed + FADE_EPSILON >= transition.duration;
        let progress = if done {
            1.0
        } else {
            (transition.elapsed / transition.duration).clamp(0.0, 1.0)
        };

        self.actions[transition.from].weight = 1.0 - progress;
        self.actions[transition.to].weight = progress;

        if done {
            self.disable(transition.from);
            self.transition = None;
        } else {
            self.transition = Some(transition);
        }
    }

    /// Name of the action driving the result (the incoming one during a fade).
    #[must_use]
    pub fn active_name(&self) -> Option<&str> {
        self.active.map(|index| self.actions[index].name())
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    #[must_use]
    pub fn action(&self, name: &str) -> Option<&AnimationAction> {
        self.actions.iter().find(|a| a.name() == name)
    }

    /// True when the named action is not playing, or has played to its end.
    ///
    /// Polled once per tick instead of registering a completion callback.
    #[must_use]
    pub fn is_finished(&self, name: &str) -> bool {
        self.action(name).is_none_or(|a| !a.enabled || a.is_finished())
    }

    #[must_use]
    pub fn is_jump_animation_finished(&self) -> bool {
        self.is_finished(library::JUMP)
    }

    /// Clip, local time and weight of every enabled action.
    #[must_use]
    pub fn actions(&self) -> ActionList {
        self.actions
            .iter()
            .filter(|a| a.enabled)
            .map(|a| ActionSnapshot {
                clip: Arc::clone(a.clip()),
                time: a.time,
                weight: a.weight,
            })
            .collect()
    }

    /// Weighted sum of every enabled action's channels at its local time.
    pub fn sample(&mut self) -> Pose {
        let mut pose = Pose::zero();
        let mut total_weight = 0.0;

        for action in &mut self.actions {
            if !action.enabled || action.weight <= 0.0 {
                continue;
            }
            let weight = action.weight;
            for channel in Channel::ALL {
                let value = action.sample(channel);
                pose.accumulate(channel, value, weight);
            }
            total_weight += weight;
        }

        if total_weight <= 0.0 {
            return Pose::rest();
        }
        pose
    }
}
