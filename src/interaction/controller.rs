use super::labels::Labels;
use super::manipulator::Manipulator;
use super::mode::{transition, ModeEvent, ModeState};
use super::selection::SelectionNavigator;
use crate::placement::{PlacementEngine, PlacementOutcome, PlacementPose, PoseResolver};
use crate::scene::{ObjectIndex, ObjectRegistry};
use crate::tracking::{CameraView, PlaneFilter, SurfaceQuery};
use serde::{Deserialize, Serialize};

/// Discrete commands from the UI channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    EnterPlacement,
    EnterManipulation,
    SelectNext,
    SelectPrevious,
    BeginMove,
    SetScale(f32),
    /// Yaw in degrees.
    SetRotation(f32),
}

/// Which on-screen controls should be shown this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlVisibility {
    pub placement_indicator: bool,
    pub scale_slider: bool,
    pub rotation_slider: bool,
    pub prev_button: bool,
    pub next_button: bool,
    pub move_button: bool,
    pub selection_label: bool,
    pub placement_mode_button: bool,
    pub manipulation_mode_button: bool,
}

/// Everything the render and UI sinks need after a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub mode: ModeState,
    pub visibility: ControlVisibility,
    /// Present only while the indicator is visible.
    pub indicator: Option<PlacementPose>,
    pub label: Option<String>,
    pub move_button_caption: Option<String>,
    pub outcome: Option<PlacementOutcome>,
}

/// Owns the interaction state and runs one step per rendered frame.
///
/// Commands are applied through [`ModeController::handle_command`] before
/// [`ModeController::tick`]; the tick resolves the pose, handles the tap and
/// then derives control visibility from the resulting state.
#[derive(Debug)]
pub struct ModeController {
    mode: ModeState,
    registry: ObjectRegistry,
    selection: SelectionNavigator,
    resolver: PoseResolver,
    engine: PlacementEngine,
    manipulator: Manipulator,
    labels: Labels,
}

impl ModeController {
    pub fn new(filter: PlaneFilter, default_scale: f32, noun: &str) -> Self {
        Self {
            mode: ModeState::default(),
            registry: ObjectRegistry::new(),
            selection: SelectionNavigator::new(),
            resolver: PoseResolver::new(filter),
            engine: PlacementEngine::new(default_scale, noun),
            manipulator: Manipulator,
            labels: Labels::new(noun),
        }
    }

    #[cfg(test)]
    pub fn mode(&self) -> ModeState {
        self.mode
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    #[cfg(test)]
    pub fn selection(&self) -> &SelectionNavigator {
        &self.selection
    }

    /// Selected object index, re-resolved against the registry on every call.
    pub fn selected(&self) -> Option<ObjectIndex> {
        self.selection.selected(&self.registry)
    }

    /// Applies one UI command. Returns false when the command was a no-op.
    pub fn handle_command(&mut self, command: Command) -> bool {
        match (self.mode, command) {
            (_, Command::EnterPlacement) => self.apply(ModeEvent::EnterPlacement),
            (_, Command::EnterManipulation) => self.apply(ModeEvent::EnterManipulation),

            (ModeState::Manipulation, Command::SelectNext) => {
                let before = self.selection.current_index();
                self.selection.next(&self.registry);
                before != self.selection.current_index()
            }
            (ModeState::Manipulation, Command::SelectPrevious) => {
                let before = self.selection.current_index();
                self.selection.prev(&self.registry);
                before != self.selection.current_index()
            }
            (ModeState::Manipulation, Command::BeginMove) => {
                let selected = self.selected();
                if selected.is_none() {
                    log::warn!("No selected object to move");
                }
                self.apply(ModeEvent::BeginMove { selected })
            }
            (ModeState::Manipulation, Command::SetScale(value)) => {
                let selected = self.selected();
                self.manipulator.set_scale(&mut self.registry, selected, value)
            }
            (ModeState::Manipulation, Command::SetRotation(degrees)) => {
                let selected = self.selected();
                self.manipulator.set_rotation(&mut self.registry, selected, degrees)
            }

            (mode, command) => {
                log::debug!("{:?} ignored in {} mode", command, mode.name());
                false
            }
        }
    }

    /// Runs one frame: pose resolution, tap handling, then visibility.
    pub fn tick<D>(&mut self, device: &D, tap: bool) -> FrameOutput
    where
        D: SurfaceQuery + CameraView,
    {
        let mut indicator = None;
        let mut outcome = None;

        if self.mode.is_placement_capable() {
            let pose = self.resolver.resolve(device);
            if pose.valid {
                indicator = Some(pose);
            }
            if tap {
                outcome = self
                    .engine
                    .place(&pose, self.mode.move_target(), &mut self.registry);
                if let Some(PlacementOutcome::Relocated(_)) = outcome {
                    self.apply(ModeEvent::Relocated);
                }
            }
        } else if tap {
            log::debug!("Tap ignored in {} mode", self.mode.name());
        }

        self.frame_output(indicator, outcome)
    }

    fn apply(&mut self, event: ModeEvent) -> bool {
        let next = transition(self.mode, event);
        if next == self.mode {
            log::debug!("{:?} ignored in {} mode", event, self.mode.name());
            return false;
        }
        log::info!("Mode {} -> {}", self.mode.name(), next.name());
        self.mode = next;
        true
    }

    fn frame_output(
        &self,
        indicator: Option<PlacementPose>,
        outcome: Option<PlacementOutcome>,
    ) -> FrameOutput {
        let mut visibility = ControlVisibility::default();
        let mut label = None;
        let mut move_button_caption = None;

        match self.mode {
            ModeState::Placement => {
                visibility.placement_indicator = indicator.is_some();
                visibility.manipulation_mode_button = true;
            }
            ModeState::Manipulation => {
                let selected = self.selected();
                let nav = self.selection.nav_visibility(self.registry.len());
                visibility.scale_slider = true;
                visibility.rotation_slider = true;
                visibility.prev_button = nav.prev;
                visibility.next_button = nav.next;
                visibility.move_button = selected.is_some();
                visibility.selection_label = selected.is_some();
                visibility.placement_mode_button = true;
                label = selected.map(|index| self.labels.modifying(index));
                move_button_caption = selected.map(|index| self.labels.move_button(index));
            }
            ModeState::ManipulationMoving { target } => {
                visibility.placement_indicator = indicator.is_some();
                visibility.selection_label = true;
                label = Some(self.labels.moving(target));
            }
        }

        FrameOutput {
            mode: self.mode,
            visibility,
            indicator: indicator.filter(|_| visibility.placement_indicator),
            label,
            move_button_caption,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Command, ModeController};
    use crate::interaction::mode::ModeState;
    use crate::placement::PlacementOutcome;
    use crate::scene::{ObjectIndex, ObjectTransform};
    use crate::tracking::fake::FakeDevice;
    use crate::tracking::PlaneFilter;
    use glam::{Quat, Vec3};

    fn controller() -> ModeController {
        ModeController::new(PlaneFilter::WithinPolygon, 1.0, "Plant")
    }

    fn idx(n: usize) -> ObjectIndex {
        ObjectIndex::new(n).unwrap()
    }

    fn place_n(controller: &mut ModeController, n: usize) {
        for i in 0..n {
            let device = FakeDevice::hitting(Vec3::new(i as f32, 0.0, 1.0));
            controller.tick(&device, true);
        }
    }

    #[test]
    fn starts_in_placement_with_manipulation_button() {
        let mut controller = controller();
        let out = controller.tick(&FakeDevice::missing(), false);
        assert_eq!(out.mode, ModeState::Placement);
        assert!(out.visibility.manipulation_mode_button);
        assert!(!out.visibility.placement_mode_button);
        assert!(!out.visibility.placement_indicator);
        assert!(!out.visibility.scale_slider);
        assert_eq!(out.indicator, None);
        assert_eq!(out.label, None);
    }

    #[test]
    fn indicator_follows_pose_validity() {
        let mut controller = controller();
        let out = controller.tick(&FakeDevice::hitting(Vec3::new(0.0, 0.0, 2.0)), false);
        assert!(out.visibility.placement_indicator);
        assert_eq!(out.indicator.map(|pose| pose.position), Some(Vec3::new(0.0, 0.0, 2.0)));

        let out = controller.tick(&FakeDevice::missing(), false);
        assert!(!out.visibility.placement_indicator);
        assert_eq!(out.indicator, None);
    }

    #[test]
    fn n_taps_place_n_objects_in_order() {
        for n in [0usize, 1, 2, 7] {
            let mut controller = controller();
            place_n(&mut controller, n);
            let registry = controller.registry();
            assert_eq!(registry.len(), n);
            for (slot, object) in registry.iter().enumerate() {
                assert_eq!(object.index().get(), slot + 1);
                assert_eq!(object.transform.position.x, slot as f32);
            }
            assert_eq!(controller.mode(), ModeState::Placement);
        }
    }

    #[test]
    fn spawn_is_reported_and_uses_camera_bearing() {
        let mut controller = controller();
        let device = FakeDevice::hitting(Vec3::new(0.0, 0.0, 3.0)).facing(Vec3::new(1.0, -0.5, 0.0));
        let out = controller.tick(&device, true);
        assert_eq!(out.outcome, Some(PlacementOutcome::Spawned(idx(1))));

        let object = controller.registry().get(idx(1)).unwrap();
        assert!((object.transform.yaw_degrees() - 90.0).abs() < 1e-3);
        assert_eq!(object.transform.scale, Vec3::ONE);
    }

    #[test]
    fn tap_without_valid_pose_changes_nothing() {
        let mut controller = controller();
        place_n(&mut controller, 2);
        let before: Vec<ObjectTransform> =
            controller.registry().iter().map(|object| object.transform).collect();

        let out = controller.tick(&FakeDevice::missing(), true);
        assert_eq!(out.outcome, None);
        let after: Vec<ObjectTransform> =
            controller.registry().iter().map(|object| object.transform).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn manipulation_mode_shows_controls_and_label() {
        let mut controller = controller();
        place_n(&mut controller, 3);
        assert!(controller.handle_command(Command::EnterManipulation));

        let device = FakeDevice::hitting(Vec3::ZERO);
        let out = controller.tick(&device, false);
        assert_eq!(device.queries.get(), 0);
        let vis = out.visibility;
        assert!(vis.scale_slider && vis.rotation_slider && vis.move_button);
        assert!(vis.selection_label && vis.placement_mode_button);
        assert!(!vis.manipulation_mode_button);
        assert!(!vis.placement_indicator);
        assert!(!vis.prev_button);
        assert!(vis.next_button);
        assert_eq!(out.label.as_deref(), Some("Modifying Plant - 1"));
        assert_eq!(out.move_button_caption.as_deref(), Some("Move Plant-1"));
    }

    #[test]
    fn navigation_updates_label_and_buttons() {
        let mut controller = controller();
        place_n(&mut controller, 3);
        controller.handle_command(Command::EnterManipulation);

        assert!(controller.handle_command(Command::SelectNext));
        let out = controller.tick(&FakeDevice::missing(), false);
        assert_eq!(out.label.as_deref(), Some("Modifying Plant - 2"));
        assert!(out.visibility.prev_button && out.visibility.next_button);

        controller.handle_command(Command::SelectNext);
        assert!(!controller.handle_command(Command::SelectNext));
        let out = controller.tick(&FakeDevice::missing(), false);
        assert_eq!(out.label.as_deref(), Some("Modifying Plant - 3"));
        assert!(out.visibility.prev_button);
        assert!(!out.visibility.next_button);
    }

    #[test]
    fn tap_in_manipulation_is_ignored() {
        let mut controller = controller();
        place_n(&mut controller, 1);
        controller.handle_command(Command::EnterManipulation);
        let out = controller.tick(&FakeDevice::hitting(Vec3::ONE), true);
        assert_eq!(out.outcome, None);
        assert_eq!(controller.registry().len(), 1);
    }

    #[test]
    fn move_workflow_relocates_selected_object() {
        let mut controller = controller();
        place_n(&mut controller, 3);
        controller.handle_command(Command::EnterManipulation);
        controller.handle_command(Command::SelectNext);
        controller.handle_command(Command::SetScale(2.0));
        controller.handle_command(Command::SetRotation(45.0));
        let before = controller.registry().get(idx(2)).unwrap().transform;

        assert!(controller.handle_command(Command::BeginMove));
        assert_eq!(controller.mode(), ModeState::ManipulationMoving { target: idx(2) });

        let out = controller.tick(&FakeDevice::missing(), false);
        assert_eq!(out.label.as_deref(), Some("Moving Plant - 2"));
        assert!(out.visibility.selection_label);
        assert!(!out.visibility.scale_slider && !out.visibility.move_button);
        assert!(!out.visibility.prev_button && !out.visibility.next_button);
        assert!(!out.visibility.placement_mode_button && !out.visibility.manipulation_mode_button);

        // A miss keeps the move pending.
        let out = controller.tick(&FakeDevice::missing(), true);
        assert_eq!(out.outcome, None);
        assert!(matches!(controller.mode(), ModeState::ManipulationMoving { .. }));

        let target = Vec3::new(5.0, 0.0, -1.0);
        let out = controller.tick(&FakeDevice::hitting(target).facing(Vec3::X), true);
        assert_eq!(out.outcome, Some(PlacementOutcome::Relocated(idx(2))));
        assert_eq!(out.mode, ModeState::Manipulation);
        assert!(out.visibility.scale_slider);
        assert!(!out.visibility.placement_indicator);
        assert_eq!(out.indicator, None);

        let after = controller.registry().get(idx(2)).unwrap().transform;
        assert_eq!(after.position, target);
        assert_eq!(after.rotation, before.rotation);
        assert_eq!(after.scale, before.scale);
        assert_eq!(controller.registry().len(), 3);
    }

    #[test]
    fn moving_state_shows_indicator_on_valid_pose() {
        let mut controller = controller();
        place_n(&mut controller, 1);
        controller.handle_command(Command::EnterManipulation);
        controller.handle_command(Command::BeginMove);
        let out = controller.tick(&FakeDevice::hitting(Vec3::ONE), false);
        assert!(out.visibility.placement_indicator);
        assert!(out.indicator.is_some());
        assert_eq!(controller.registry().get(idx(1)).unwrap().transform.position.x, 0.0);
    }

    #[test]
    fn mode_commands_are_ignored_while_moving() {
        let mut controller = controller();
        place_n(&mut controller, 1);
        controller.handle_command(Command::EnterManipulation);
        controller.handle_command(Command::BeginMove);

        for command in [
            Command::EnterPlacement,
            Command::EnterManipulation,
            Command::SelectNext,
            Command::SelectPrevious,
            Command::BeginMove,
            Command::SetScale(3.0),
            Command::SetRotation(10.0),
        ] {
            assert!(!controller.handle_command(command), "{:?}", command);
            assert_eq!(controller.mode(), ModeState::ManipulationMoving { target: idx(1) });
        }
        assert_eq!(controller.registry().get(idx(1)).unwrap().transform.scale, Vec3::ONE);
    }

    #[test]
    fn empty_registry_manipulation_is_inert() {
        let mut controller = controller();
        controller.handle_command(Command::EnterManipulation);

        assert!(!controller.handle_command(Command::SelectNext));
        assert!(!controller.handle_command(Command::SelectPrevious));
        assert!(!controller.handle_command(Command::SetScale(2.0)));
        assert!(!controller.handle_command(Command::SetRotation(90.0)));
        assert!(!controller.handle_command(Command::BeginMove));
        assert_eq!(controller.mode(), ModeState::Manipulation);

        let out = controller.tick(&FakeDevice::missing(), false);
        assert!(!out.visibility.prev_button && !out.visibility.next_button);
        assert!(!out.visibility.selection_label);
        assert!(!out.visibility.move_button);
        assert_eq!(out.label, None);
        assert_eq!(out.move_button_caption, None);
        assert!(out.visibility.scale_slider && out.visibility.placement_mode_button);
        assert!(controller.registry().is_empty());
    }

    #[test]
    fn scale_and_rotation_target_only_the_selection() {
        let mut controller = controller();
        place_n(&mut controller, 2);
        controller.handle_command(Command::EnterManipulation);
        controller.handle_command(Command::SelectNext);

        assert!(controller.handle_command(Command::SetScale(0.5)));
        assert!(controller.handle_command(Command::SetRotation(180.0)));

        let first = controller.registry().get(idx(1)).unwrap().transform;
        let second = controller.registry().get(idx(2)).unwrap().transform;
        assert_eq!(first.scale, Vec3::ONE);
        assert_eq!(second.scale, Vec3::splat(0.5));
        assert!(second.rotation.angle_between(Quat::from_rotation_y(std::f32::consts::PI)) < 1e-4);
    }

    #[test]
    fn manipulation_commands_are_ignored_in_placement() {
        let mut controller = controller();
        place_n(&mut controller, 2);
        assert!(!controller.handle_command(Command::SetScale(3.0)));
        assert!(!controller.handle_command(Command::SelectNext));
        assert!(!controller.handle_command(Command::BeginMove));
        assert!(!controller.handle_command(Command::EnterPlacement));
        assert_eq!(controller.selection().current_index(), idx(1));
        assert_eq!(controller.registry().get(idx(1)).unwrap().transform.scale, Vec3::ONE);
    }

    #[test]
    fn selection_survives_mode_round_trip() {
        let mut controller = controller();
        place_n(&mut controller, 3);
        controller.handle_command(Command::EnterManipulation);
        controller.handle_command(Command::SelectNext);
        controller.handle_command(Command::EnterPlacement);
        place_n(&mut controller, 1);
        controller.handle_command(Command::EnterManipulation);
        assert_eq!(controller.selected(), Some(idx(2)));
        assert_eq!(controller.registry().len(), 4);
    }
}
