use stride_animation::{
    AnimationChannel, AnimationRegistry, ClipInfo, ClipPlayer, ClipRegistry, FinishedEvent, LoopMode, Subscription,
};
use stride_core::{InputSnapshot, Intent, LocomotionState};
use stride_fsm::{LocomotionMachine, Transition};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    CrossFade {
        from: String,
        to: String,
        duration: f32,
        warp: bool,
    },
    Subscribe(String),
    Unsubscribe(String),
}

/// Forwards to a [`ClipRegistry`] and records every command that changes
/// listeners or starts a blend.
struct RecordingRegistry {
    inner: ClipRegistry,
    calls: Vec<Call>,
}

impl RecordingRegistry {
    fn new() -> Self {
        let inner = ClipRegistry::new()
            .with_clip("idle", 2.0)
            .with_clip("walk", 1.2)
            .with_clip("run", 0.8)
            .with_clip("walk_backward", 1.1)
            .with_clip("run_backward", 0.7)
            .with_clip("stand_to_crouch", 0.6)
            .with_clip("crouch_walk", 1.4)
            .with_clip("crouch_idle", 3.0)
            .with_clip("strafe_left", 0.9)
            .with_clip("gesture", 1.0);
        Self {
            inner,
            calls: Vec::new(),
        }
    }

    fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }
}

impl AnimationRegistry for RecordingRegistry {
    type Channel = ClipPlayer;

    fn channel(&self, name: &str) -> Option<&ClipPlayer> {
        self.inner.channel(name)
    }

    fn channel_mut(&mut self, name: &str) -> Option<&mut ClipPlayer> {
        self.inner.channel_mut(name)
    }

    fn cross_fade(&mut self, from: &str, to: &str, duration: f32, warp: bool) -> bool {
        self.calls.push(Call::CrossFade {
            from: from.into(),
            to: to.into(),
            duration,
            warp,
        });
        self.inner.cross_fade(from, to, duration, warp)
    }

    fn on_finished(&mut self, name: &str) -> Option<Subscription> {
        self.calls.push(Call::Subscribe(name.into()));
        self.inner.on_finished(name)
    }

    fn remove_finished_listener(&mut self, subscription: Subscription) -> bool {
        self.calls.push(Call::Unsubscribe(subscription.channel().into()));
        self.inner.remove_finished_listener(subscription)
    }

    fn listener_count(&self) -> usize {
        self.inner.listener_count()
    }

    fn advance(&mut self, dt: f32) -> Vec<FinishedEvent> {
        self.inner.advance(dt)
    }
}

fn held(intents: &[Intent]) -> InputSnapshot {
    intents
        .iter()
        .fold(InputSnapshot::default(), |input, &intent| input.with(intent, true))
}

fn start(state: &str) -> (LocomotionMachine, RecordingRegistry) {
    let mut machine = LocomotionMachine::default();
    let mut channels = RecordingRegistry::new();
    machine.set_state(state, &mut channels).unwrap();
    channels.take_calls();
    (machine, channels)
}

/// Advances channels and feeds completion events back, like one frame tail.
fn advance(machine: &mut LocomotionMachine, channels: &mut RecordingRegistry, dt: f32) -> Vec<Transition> {
    let events = channels.advance(dt);
    events
        .iter()
        .map(|event| machine.notify_finished(event, channels).unwrap())
        .collect()
}

#[test]
fn idle_forward_enters_walk_from_start_with_default_blend() {
    let (mut machine, mut channels) = start("idle");
    advance(&mut machine, &mut channels, 0.7);

    let transition = machine.update(0.016, &held(&[Intent::Forward]), &mut channels).unwrap();
    let event = transition.entered().unwrap();
    assert_eq!(event.from, Some(LocomotionState::Idle));
    assert_eq!(event.to, LocomotionState::Walk);

    assert_eq!(
        channels.take_calls(),
        vec![Call::CrossFade {
            from: "idle".into(),
            to: "walk".into(),
            duration: 0.5,
            warp: true
        }]
    );
    let walk = channels.channel("walk").unwrap();
    assert_eq!(walk.current_time(), 0.0);
    assert_eq!(walk.loop_mode(), LoopMode::Repeat);
    assert!(walk.is_playing());
    assert_eq!(walk.effective_weight(), 0.0);

    advance(&mut machine, &mut channels, 0.5);
    assert!(!channels.channel("idle").unwrap().is_playing());
    assert!((channels.channel("walk").unwrap().effective_weight() - 1.0).abs() < 1e-5);
}

#[test]
fn walk_to_run_preserves_cycle_phase() {
    let (mut machine, mut channels) = start("walk");
    advance(&mut machine, &mut channels, 0.6);
    let walk_time = channels.channel("walk").unwrap().current_time();
    assert!((walk_time - 0.6).abs() < 1e-5);

    machine
        .update(0.016, &held(&[Intent::Forward, Intent::Sprint]), &mut channels)
        .unwrap();
    assert_eq!(machine.current_kind(), Some(LocomotionState::Run));

    let run_time = channels.channel("run").unwrap().current_time();
    assert!((run_time - walk_time * 0.8 / 1.2).abs() < 1e-5, "run time {run_time}");
}

/// Plays `from` for `elapsed` seconds, enters `to` directly and returns
/// (time in `from` at the switch, time in `to` right after entering).
fn phase_across(from: &str, elapsed: f32, to: &str) -> (f32, f32) {
    let (mut machine, mut channels) = start(from);
    advance(&mut machine, &mut channels, elapsed);
    let before = channels.channel(from).unwrap().current_time();
    machine.set_state(to, &mut channels).unwrap();
    assert_eq!(machine.current_name(), Some(to));
    (before, channels.channel(to).unwrap().current_time())
}

#[test]
fn every_cycle_family_pair_carries_phase_both_ways() {
    let durations = [
        ("walk", 1.2_f32),
        ("run", 0.8),
        ("run_backward", 0.7),
        ("strafe_left", 0.9),
    ];
    let duration = |name: &str| durations.iter().find(|(n, _)| *n == name).unwrap().1;

    for partner in ["run", "run_backward", "strafe_left"] {
        for (from, to) in [("walk", partner), (partner, "walk")] {
            let elapsed = 0.5 * duration(from);
            let (before, after) = phase_across(from, elapsed, to);
            let expected = before * duration(to) / duration(from);
            assert!(
                (after - expected).abs() < 1e-5,
                "{from} -> {to}: expected {expected}, got {after}"
            );
            assert!(after > 0.0);
        }
    }
}

#[test]
fn run_to_walk_from_the_table_keeps_phase() {
    let (mut machine, mut channels) = start("run");
    advance(&mut machine, &mut channels, 0.5);

    machine.update(0.016, &held(&[Intent::Forward]), &mut channels).unwrap();
    assert_eq!(machine.current_kind(), Some(LocomotionState::Walk));
    let walk_time = channels.channel("walk").unwrap().current_time();
    assert!((walk_time - 0.5 * 1.2 / 0.8).abs() < 1e-5, "walk time {walk_time}");
}

#[test]
fn run_backward_to_walk_from_the_table_keeps_phase() {
    let (mut machine, mut channels) = start("run_backward");
    advance(&mut machine, &mut channels, 0.5);

    machine.update(0.016, &held(&[Intent::Backward]), &mut channels).unwrap();
    assert_eq!(machine.current_kind(), Some(LocomotionState::Walk));
    let walk_time = channels.channel("walk").unwrap().current_time();
    assert!((walk_time - 0.5 * 1.2 / 0.7).abs() < 1e-5, "walk time {walk_time}");
}

#[test]
fn zero_length_source_clip_restarts_the_family_partner() {
    let mut machine = LocomotionMachine::default();
    let mut channels = RecordingRegistry::new();
    channels.inner.insert(ClipInfo::new("walk", 0.0));
    channels.channel_mut("run").unwrap().set_time(0.3);

    machine.set_state("walk", &mut channels).unwrap();
    advance(&mut machine, &mut channels, 0.4);
    machine.set_state("run", &mut channels).unwrap();

    let run = channels.channel("run").unwrap();
    assert_eq!(run.current_time(), 0.0);
    assert_eq!(run.time_scale(), 1.0);
    assert_eq!(run.weight(), 1.0);
}

#[test]
fn unrelated_pair_restarts_the_entering_clip() {
    let (mut machine, mut channels) = start("walk");
    channels.channel_mut("crouch_walk").unwrap().set_time(0.9);
    advance(&mut machine, &mut channels, 0.3);

    machine
        .update(0.016, &held(&[Intent::Forward, Intent::Crouch]), &mut channels)
        .unwrap();
    assert_eq!(machine.current_kind(), Some(LocomotionState::CrouchWalk));
    let crouch_walk = channels.channel("crouch_walk").unwrap();
    assert_eq!(crouch_walk.current_time(), 0.0);
    assert_eq!(crouch_walk.weight(), 1.0);
}

#[test]
fn crouch_walk_without_input_settles_into_crouch_idle() {
    let (mut machine, mut channels) = start("crouch_walk");
    let transition = machine.update(0.016, &InputSnapshot::default(), &mut channels).unwrap();
    assert_eq!(transition.entered().map(|e| e.to), Some(LocomotionState::CrouchIdle));
    assert_eq!(
        channels.take_calls(),
        vec![Call::CrossFade {
            from: "crouch_walk".into(),
            to: "crouch_idle".into(),
            duration: 0.5,
            warp: true
        }]
    );
}

#[test]
fn backward_uses_the_short_blend() {
    let (mut machine, mut channels) = start("walk");
    machine.update(0.016, &held(&[Intent::Backward]), &mut channels).unwrap();
    assert!(matches!(
        channels.take_calls().as_slice(),
        [Call::CrossFade { duration, .. }] if *duration == 0.1
    ));
}

#[test]
fn reaffirming_the_current_state_does_nothing() {
    let (mut machine, mut channels) = start("walk_backward");
    advance(&mut machine, &mut channels, 0.4);
    let before = channels.channel("walk_backward").unwrap().current_time();

    for _ in 0..3 {
        let transition = machine.update(0.016, &held(&[Intent::Backward]), &mut channels).unwrap();
        assert_eq!(transition, Transition::Unchanged);
    }
    assert!(channels.take_calls().is_empty());
    assert_eq!(channels.channel("walk_backward").unwrap().current_time(), before);

    machine.set_state("gesture", &mut channels).unwrap();
    machine.set_state("gesture", &mut channels).unwrap();
    let subscriptions = channels
        .take_calls()
        .into_iter()
        .filter(|c| matches!(c, Call::Subscribe(_)))
        .count();
    assert_eq!(subscriptions, 1);
    assert_eq!(channels.listener_count(), 1);
}

#[test]
fn gesture_completion_returns_to_idle_and_releases_listener() {
    let (mut machine, mut channels) = start("idle");
    machine.update(0.016, &held(&[Intent::Gesture]), &mut channels).unwrap();
    assert_eq!(machine.current_kind(), Some(LocomotionState::Gesture));
    assert_eq!(channels.listener_count(), 1);
    let gesture = channels.channel("gesture").unwrap();
    assert_eq!(gesture.loop_mode(), LoopMode::Once);

    let mut transitions = Vec::new();
    for _ in 0..40 {
        transitions.extend(advance(&mut machine, &mut channels, 0.1));
        if machine.current_kind() == Some(LocomotionState::Idle) {
            break;
        }
    }
    assert_eq!(machine.current_kind(), Some(LocomotionState::Idle));
    assert_eq!(transitions.len(), 1);
    assert_eq!(
        transitions[0].entered().map(|e| (e.from, e.to)),
        Some((Some(LocomotionState::Gesture), LocomotionState::Idle))
    );
    assert_eq!(channels.listener_count(), 0);

    let calls = channels.take_calls();
    assert!(calls.contains(&Call::Subscribe("gesture".into())));
    assert!(calls.contains(&Call::Unsubscribe("gesture".into())));
}

#[test]
fn interrupted_gesture_leaves_no_stale_listener() {
    let (mut machine, mut channels) = start("idle");
    machine.set_state("gesture", &mut channels).unwrap();
    let stale = FinishedEvent {
        channel: "gesture".into(),
        subscription: machine.current().and_then(|s| s.completion()).unwrap().id(),
    };

    machine.update(0.016, &held(&[Intent::Forward]), &mut channels).unwrap();
    assert_eq!(machine.current_kind(), Some(LocomotionState::Walk));
    assert_eq!(channels.listener_count(), 0);

    // The interrupted clip still runs to its end while fading out.
    for _ in 0..30 {
        assert!(advance(&mut machine, &mut channels, 0.1).is_empty());
    }
    assert_eq!(
        machine.notify_finished(&stale, &mut channels).unwrap(),
        Transition::Unchanged
    );
    assert_eq!(machine.current_kind(), Some(LocomotionState::Walk));
}

#[test]
fn repeated_gestures_balance_listeners() {
    let (mut machine, mut channels) = start("idle");
    for _ in 0..5 {
        machine.set_state("gesture", &mut channels).unwrap();
        assert_eq!(channels.listener_count(), 1);
        let gesture = channels.channel("gesture").unwrap();
        assert_eq!(gesture.current_time(), 0.0);
        assert!(!gesture.is_finished());

        for _ in 0..40 {
            advance(&mut machine, &mut channels, 0.1);
            if machine.current_kind() == Some(LocomotionState::Idle) {
                break;
            }
        }
        assert_eq!(machine.current_kind(), Some(LocomotionState::Idle));
        assert_eq!(channels.listener_count(), 0);
    }
}

#[test]
fn one_state_is_current_after_activation() {
    let (mut machine, mut channels) = start("idle");
    let inputs = [
        held(&[Intent::Forward]),
        held(&[Intent::Forward, Intent::Sprint]),
        held(&[Intent::Forward, Intent::Crouch]),
        InputSnapshot::default(),
        held(&[Intent::Crouch]),
        InputSnapshot::default(),
        held(&[Intent::Backward, Intent::Sprint]),
    ];
    for input in inputs.iter().cycle().take(50) {
        machine.update(0.016, input, &mut channels).unwrap();
        advance(&mut machine, &mut channels, 0.016);
        assert!(machine.current().is_some());
    }
}
