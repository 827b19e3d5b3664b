use super::STARTUP_ANIMATION_DURATION;
use super::half::{BottomHalf, WheelHalf};
use super::model::{AdapterPosition, AttachAt, LayoutCursor, Sector, SectorLayoutParams};
use super::recycler::{SectorRecycler, SectorView};
use crate::animation::{
    AnimatorListener, AnimatorState, Interpolator, StartupAnimationListener, StartupSettle,
    ValueAnimator, WheelStartupAnimationStatus,
};
use crate::rotator::{RotationDirection, Rotator};
use std::collections::VecDeque;
use std::time::Duration;
use wheelmath::{ANGLE_EPSILON, AngularRestrictions, ComputationHelper};

pub trait InitialLayoutFinishingListener {
    fn on_initial_layout_finished(&mut self, resting_position: AdapterPosition);
}

impl<F> InitialLayoutFinishingListener for F
where
    F: FnMut(AdapterPosition),
{
    fn on_initial_layout_finished(&mut self, resting_position: AdapterPosition) {
        self(resting_position)
    }
}

struct SectorLayout<R: SectorRecycler> {
    recycler: R,
    sectors: VecDeque<Sector<R::View>>,
    helper: ComputationHelper,
    start_angle_rad: f64,
    end_angle_rad: f64,
}

impl<R: SectorRecycler> SectorLayout<R> {
    fn setup_sector_for_position(&mut self, position: AdapterPosition, angle_rad: f64, attach: AttachAt) {
        let mut view = self.recycler.acquire(position);
        let params = SectorLayoutParams::new(position, angle_rad);
        view.on_layout_params_changed(&params);

        let sector = Sector { view, params };
        match attach {
            AttachAt::StartEdge => self.sectors.push_front(sector),
            AttachAt::EndEdge => self.sectors.push_back(sector),
        }
    }

    fn fill_from(&mut self, mut cursor: LayoutCursor, item_count: usize) -> LayoutCursor {
        let sector_angle_rad = self.helper.sector_angle_rad();
        let mut inside_bounds = self.is_inside_layout_bounds(cursor.layout_angle_rad);

        while inside_bounds && cursor.layouted_children_count < item_count {
            self.setup_sector_for_position(cursor.child_pos, cursor.layout_angle_rad, AttachAt::EndEdge);
            cursor.advance(sector_angle_rad);
            inside_bounds = self.is_inside_layout_bounds(cursor.layout_angle_rad);
        }
        cursor
    }

    // when a sector's top edge reaches the end edge it has left the arc
    fn is_inside_layout_bounds(&self, angle_rad: f64) -> bool {
        self.helper.sector_top_edge_angle_rad(angle_rad) > self.end_angle_rad
    }

    // rotated sectors carry rounding error, so edge tests after rotation allow for it
    fn has_left_end_edge(&self, angle_rad: f64) -> bool {
        self.helper.sector_top_edge_angle_rad(angle_rad) <= self.end_angle_rad + ANGLE_EPSILON
    }

    fn release_all(&mut self) {
        for sector in self.sectors.drain(..) {
            self.recycler.release(sector.view);
        }
    }

    fn angle_of(&self, position: AdapterPosition) -> Option<f64> {
        self.sectors
            .iter()
            .find(|s| s.params.adapter_position == position)
            .map(|s| s.params.angle_position_rad)
    }

    /// Drops sectors that rotated off the arc and fills the space opened on the other side. With
    /// `reseed` set, an arc that rotated empty continues the sequence from the opposite edge.
    fn maintain(&mut self, direction: RotationDirection, item_count: usize, reseed: bool) {
        if item_count == 0 {
            return;
        }

        match direction {
            RotationDirection::Clockwise => {
                let seed = self.sectors.front().map(|s| s.params);
                self.recycle_past_end_edge();
                if reseed
                    && self.sectors.is_empty()
                    && let Some(seed) = seed
                {
                    self.reseed_above_end_edge(seed);
                }
                self.fill_towards_start_edge(item_count);
            }
            RotationDirection::Anticlockwise => {
                let seed = self.sectors.back().map(|s| s.params);
                self.recycle_past_start_edge();
                if reseed
                    && self.sectors.is_empty()
                    && let Some(seed) = seed
                {
                    self.reseed_below_start_edge(seed);
                }
                self.fill_towards_end_edge(item_count);
            }
        }
    }

    fn recycle_past_end_edge(&mut self) {
        while self
            .sectors
            .back()
            .is_some_and(|s| self.has_left_end_edge(s.params.angle_position_rad))
        {
            if let Some(sector) = self.sectors.pop_back() {
                self.recycler.release(sector.view);
            }
        }
    }

    fn recycle_past_start_edge(&mut self) {
        let limit = self.start_angle_rad - ANGLE_EPSILON;
        while self.sectors.front().is_some_and(|s| {
            self.helper.sector_bottom_edge_angle_rad(s.params.angle_position_rad) >= limit
        }) {
            if let Some(sector) = self.sectors.pop_front() {
                self.recycler.release(sector.view);
            }
        }
    }

    // Whole sector steps needed to bring a seed `overshoot` past an edge back inside, and the
    // remainder of the overshoot within one sector. Steps saturate on absurd rotations.
    fn reseed_steps(&self, overshoot: f64) -> (i64, f64) {
        let sector_angle_rad = self.helper.sector_angle_rad();
        let overshoot = overshoot.max(0.0);
        let steps = ((overshoot / sector_angle_rad).floor() as i64).saturating_add(1);
        let phase = match overshoot.rem_euclid(sector_angle_rad) {
            p if p < sector_angle_rad => p,
            _ => 0.0,
        };
        (steps, phase)
    }

    // the whole visible set rotated past the end edge; continue the sequence from where it left
    fn reseed_above_end_edge(&mut self, seed: SectorLayoutParams) {
        let limit = self.end_angle_rad + ANGLE_EPSILON;
        let overshoot = limit - self.helper.sector_top_edge_angle_rad(seed.angle_position_rad);
        let (steps, phase) = self.reseed_steps(overshoot);

        // top edge lands in (limit, limit + sector]
        let top_edge_rad = limit + self.helper.sector_angle_rad() - phase;
        self.setup_sector_for_position(
            seed.adapter_position.offset(steps),
            self.helper.alignment_angle_by_sector_top_edge(top_edge_rad),
            AttachAt::EndEdge,
        );
    }

    fn reseed_below_start_edge(&mut self, seed: SectorLayoutParams) {
        let limit = self.start_angle_rad - ANGLE_EPSILON;
        let overshoot = self.helper.sector_bottom_edge_angle_rad(seed.angle_position_rad) - limit;
        let (steps, phase) = self.reseed_steps(overshoot);

        // bottom edge lands in [limit - sector, limit)
        let bottom_edge_rad = limit - self.helper.sector_angle_rad() + phase;
        self.setup_sector_for_position(
            seed.adapter_position.offset(steps.saturating_neg()),
            self.helper.alignment_angle_by_sector_bottom_edge(bottom_edge_rad),
            AttachAt::StartEdge,
        );
    }

    fn fill_towards_start_edge(&mut self, item_count: usize) {
        let sector_angle_rad = self.helper.sector_angle_rad();
        while self.sectors.len() < item_count {
            let Some(first) = self.sectors.front().map(|s| s.params) else {
                break;
            };
            let top_edge = self.helper.sector_top_edge_angle_rad(first.angle_position_rad);
            if top_edge >= self.start_angle_rad - ANGLE_EPSILON {
                break;
            }
            self.setup_sector_for_position(
                first.adapter_position.next(),
                first.angle_position_rad + sector_angle_rad,
                AttachAt::StartEdge,
            );
        }
    }

    fn fill_towards_end_edge(&mut self, item_count: usize) {
        let sector_angle_rad = self.helper.sector_angle_rad();
        while self.sectors.len() < item_count {
            let Some(last) = self.sectors.back().map(|s| s.params) else {
                break;
            };
            let bottom_edge = self.helper.sector_bottom_edge_angle_rad(last.angle_position_rad);
            if bottom_edge <= self.end_angle_rad + ANGLE_EPSILON {
                break;
            }
            self.setup_sector_for_position(
                last.adapter_position.previous(),
                last.angle_position_rad - sector_angle_rad,
                AttachAt::EndEdge,
            );
        }
    }
}

struct StartupAnimation {
    animator: ValueAnimator,
    settle: StartupSettle,
}

struct SettleFrame<'a, R: SectorRecycler> {
    settle: &'a StartupSettle,
    layout: &'a mut SectorLayout<R>,
    rotator: Rotator,
    listener: &'a mut Option<Box<dyn StartupAnimationListener>>,
    item_count: usize,
}

impl<R: SectorRecycler> SettleFrame<'_, R> {
    fn notify(&mut self, status: WheelStartupAnimationStatus) {
        if let Some(listener) = self.listener.as_mut() {
            listener.on_startup_animation_status(status);
        }
    }
}

impl<R: SectorRecycler> AnimatorListener for SettleFrame<'_, R> {
    fn on_start(&mut self) {
        self.notify(WheelStartupAnimationStatus::Start);
    }

    fn on_update(&mut self, value: f64) {
        let anchor = self.settle.anchor();
        let Some(anchor_angle_rad) = self.layout.angle_of(anchor) else {
            if self.layout.sectors.is_empty() {
                log::debug!("Startup anchor {} settled off the arc", anchor);
            } else {
                log::warn!("Startup anchor sector {} is no longer laid out, skipping frame", anchor);
            }
            return;
        };

        let rotation_rad = self.settle.remaining_rotation(anchor_angle_rad, value);
        self.rotator
            .rotate_wheel_by(rotation_rad, self.layout.sectors.iter_mut());
        // the settle never brings new items in from past the far edge
        self.layout.maintain(self.rotator.direction(), self.item_count, false);
        self.notify(WheelStartupAnimationStatus::InProgress);
    }

    fn on_end(&mut self) {
        self.notify(WheelStartupAnimationStatus::Finished);
    }
}

/// Everything here runs on the thread that owns the manager; the host advances the startup
/// animation through [`LayoutManager::tick`].
pub struct LayoutManager<R: SectorRecycler> {
    restrictions: AngularRestrictions,
    half: Box<dyn WheelHalf>,
    layout: SectorLayout<R>,
    clockwise_rotator: Rotator,
    anticlockwise_rotator: Rotator,
    start_layout_from: AdapterPosition,
    item_count: usize,
    interpolator: Interpolator,
    initial_layout_finished: bool,
    initial_layout_listener: Option<Box<dyn InitialLayoutFinishingListener>>,
    animation_listener: Option<Box<dyn StartupAnimationListener>>,
    startup_animation: Option<StartupAnimation>,
}

impl<R: SectorRecycler> LayoutManager<R> {
    pub fn new(restrictions: AngularRestrictions, recycler: R, half: impl WheelHalf + 'static) -> Self {
        let layout = SectorLayout {
            recycler,
            sectors: VecDeque::with_capacity(restrictions.max_visible_sectors()),
            helper: ComputationHelper::from_restrictions(&restrictions),
            start_angle_rad: half.layout_start_angle_rad(&restrictions),
            end_angle_rad: half.layout_end_angle_rad(&restrictions),
        };

        Self {
            restrictions,
            clockwise_rotator: half.clockwise_rotator(),
            anticlockwise_rotator: half.anticlockwise_rotator(),
            half: Box::new(half),
            layout,
            start_layout_from: AdapterPosition::default(),
            item_count: 0,
            interpolator: Interpolator::default(),
            initial_layout_finished: false,
            initial_layout_listener: None,
            animation_listener: None,
            startup_animation: None,
        }
    }

    pub fn bottom(restrictions: AngularRestrictions, recycler: R) -> Self {
        Self::new(restrictions, recycler, BottomHalf)
    }

    pub fn with_interpolator(mut self, interpolator: Interpolator) -> Self {
        self.interpolator = interpolator;
        self
    }

    pub fn set_initial_layout_finishing_listener(
        &mut self,
        listener: impl InitialLayoutFinishingListener + 'static,
    ) {
        self.initial_layout_listener = Some(Box::new(listener));
    }

    pub fn set_startup_animation_listener(&mut self, listener: impl StartupAnimationListener + 'static) {
        self.animation_listener = Some(Box::new(listener));
    }

    pub fn restrictions(&self) -> &AngularRestrictions {
        &self.restrictions
    }

    pub fn computation_helper(&self) -> &ComputationHelper {
        &self.layout.helper
    }

    pub fn start_layout_from_adapter_position(&self) -> AdapterPosition {
        self.start_layout_from
    }

    pub fn set_start_layout_from_adapter_position(&mut self, position: AdapterPosition) {
        self.start_layout_from = position;
    }

    pub fn layout_start_angle_rad(&self) -> f64 {
        self.layout.start_angle_rad
    }

    pub fn layout_end_angle_rad(&self) -> f64 {
        self.layout.end_angle_rad
    }

    pub fn sectors(&self) -> impl ExactSizeIterator<Item = &Sector<R::View>> {
        self.layout.sectors.iter()
    }

    pub fn child_count(&self) -> usize {
        self.layout.sectors.len()
    }

    pub fn child_closest_to_layout_start_edge(&self) -> Option<&Sector<R::View>> {
        self.layout.sectors.front()
    }

    pub fn child_closest_to_layout_end_edge(&self) -> Option<&Sector<R::View>> {
        self.layout.sectors.back()
    }

    pub fn recycler(&self) -> &R {
        &self.layout.recycler
    }

    pub fn is_startup_animation_running(&self) -> bool {
        self.startup_animation.is_some()
    }

    /// Host entry point. The first call runs the startup pass, reports the resting position and
    /// starts the settle animation; every later call runs a regular pass, settling a running
    /// startup animation first.
    pub fn on_layout_children(&mut self, item_count: usize) -> LayoutCursor {
        if self.initial_layout_finished {
            self.finish_startup_animation();
            return self.layout_children_regular(item_count);
        }

        let cursor = self.layout_children_for_startup_animation(item_count);
        self.initial_layout_finished = true;
        self.notify_layout_finishing_listener(cursor.child_pos);
        self.start_wheel_startup_animation();
        cursor
    }

    pub fn layout_children_regular(&mut self, item_count: usize) -> LayoutCursor {
        self.item_count = item_count;
        self.layout.release_all();

        let start_angle_rad = self.half.layout_start_angle_rad(&self.restrictions);
        self.layout.start_angle_rad = start_angle_rad;

        let layout_angle_rad = self
            .layout
            .helper
            .alignment_angle_by_sector_top_edge(start_angle_rad);
        let cursor = self.layout.fill_from(
            LayoutCursor::new(self.start_layout_from, layout_angle_rad),
            item_count,
        );

        log::debug!(
            "Regular pass placed {} sectors from position {}, next position {}",
            cursor.layouted_children_count,
            self.start_layout_from,
            cursor.child_pos
        );
        cursor
    }

    pub fn layout_children_for_startup_animation(&mut self, item_count: usize) -> LayoutCursor {
        self.item_count = item_count;
        self.layout.release_all();

        let layout_angle_rad = self
            .layout
            .helper
            .alignment_angle_by_sector_top_edge(self.half.startup_layout_angle_rad(&self.restrictions));
        let cursor = self.layout.fill_from(
            LayoutCursor::new(self.start_layout_from, layout_angle_rad),
            item_count,
        );

        log::debug!(
            "Startup pass placed {} sectors from position {}",
            cursor.layouted_children_count,
            self.start_layout_from
        );
        cursor
    }

    fn notify_layout_finishing_listener(&mut self, last_child_pos: AdapterPosition) {
        let resting_position = last_child_pos.previous();
        log::info!("Initial layout finished, resting position {}", resting_position);
        if let Some(listener) = self.initial_layout_listener.as_mut() {
            listener.on_initial_layout_finished(resting_position);
        }
    }

    fn create_wheel_startup_animation(&self) -> Option<StartupAnimation> {
        let first = self.child_closest_to_layout_start_edge()?;
        let from_angle_rad = first.params.angle_position_rad;
        let to_angle_rad = self
            .layout
            .helper
            .alignment_angle_by_sector_top_edge(self.half.layout_start_angle_rad(&self.restrictions));

        let animator = ValueAnimator::of_f64(from_angle_rad, to_angle_rad)
            .with_duration(STARTUP_ANIMATION_DURATION)
            .with_interpolator(self.interpolator);

        Some(StartupAnimation {
            animator,
            settle: StartupSettle::new(first.params.adapter_position, from_angle_rad),
        })
    }

    fn start_wheel_startup_animation(&mut self) {
        let Some(mut startup) = self.create_wheel_startup_animation() else {
            log::debug!("Nothing laid out, skipping startup animation");
            return;
        };

        let mut frame = SettleFrame {
            settle: &startup.settle,
            layout: &mut self.layout,
            rotator: self.clockwise_rotator,
            listener: &mut self.animation_listener,
            item_count: self.item_count,
        };
        startup.animator.start(&mut frame);
        self.startup_animation = Some(startup);
    }

    /// Advances the startup animation by one frame. Returns whether it is still running.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(startup) = self.startup_animation.as_mut() else {
            return false;
        };

        let mut frame = SettleFrame {
            settle: &startup.settle,
            layout: &mut self.layout,
            rotator: self.clockwise_rotator,
            listener: &mut self.animation_listener,
            item_count: self.item_count,
        };
        let running = startup.animator.tick(dt, &mut frame) == AnimatorState::Running;

        if !running {
            self.startup_animation = None;
            log::debug!("Startup animation ended");
        }
        running
    }

    fn finish_startup_animation(&mut self) {
        let Some(mut startup) = self.startup_animation.take() else {
            return;
        };
        log::debug!("Regular layout requested, settling startup animation early");

        let mut frame = SettleFrame {
            settle: &startup.settle,
            layout: &mut self.layout,
            rotator: self.clockwise_rotator,
            listener: &mut self.animation_listener,
            item_count: self.item_count,
        };
        startup.animator.end(&mut frame);
    }

    pub fn cancel_startup_animation(&mut self) {
        if let Some(mut startup) = self.startup_animation.take() {
            startup.animator.cancel();
            log::debug!("Startup animation cancelled");
        }
    }

    pub fn detach(&mut self) {
        self.cancel_startup_animation();
        self.layout.release_all();
    }

    /// User-driven rotation. Ignored while the startup animation owns the wheel.
    pub fn rotate_wheel_by(&mut self, direction: RotationDirection, delta_rad: f64) {
        if self.is_startup_animation_running() {
            log::debug!("Ignoring {} rotation during startup animation", direction);
            return;
        }

        let (direction, delta_rad) = match (direction, delta_rad < 0.0) {
            (d, false) => (d, delta_rad),
            (RotationDirection::Clockwise, true) => (RotationDirection::Anticlockwise, -delta_rad),
            (RotationDirection::Anticlockwise, true) => (RotationDirection::Clockwise, -delta_rad),
        };
        let rotator = match direction {
            RotationDirection::Clockwise => self.clockwise_rotator,
            RotationDirection::Anticlockwise => self.anticlockwise_rotator,
        };

        rotator.rotate_wheel_by(delta_rad, self.layout.sectors.iter_mut());
        self.layout.maintain(direction, self.item_count, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wheelmath::RestrictionBounds;

    #[derive(Debug)]
    struct TestView {
        position: AdapterPosition,
        updates: usize,
    }

    impl SectorView for TestView {
        fn on_layout_params_changed(&mut self, params: &SectorLayoutParams) {
            assert_eq!(params.adapter_position, self.position);
            self.updates += 1;
        }
    }

    #[derive(Debug, Default)]
    struct TestRecycler {
        acquired: Vec<AdapterPosition>,
        released: usize,
    }

    impl SectorRecycler for TestRecycler {
        type View = TestView;

        fn acquire(&mut self, position: AdapterPosition) -> TestView {
            self.acquired.push(position);
            TestView {
                position,
                updates: 0,
            }
        }

        fn release(&mut self, _view: TestView) {
            self.released += 1;
        }
    }

    fn restrictions() -> AngularRestrictions {
        AngularRestrictions::new(RestrictionBounds {
            wheel_top_edge_angle_rad: 3.0,
            wheel_bottom_edge_angle_rad: 0.0,
            gap_area_top_edge_angle_rad: 2.0,
            gap_area_bottom_edge_angle_rad: 1.0,
            sector_angle_rad: 0.5,
        })
        .unwrap()
    }

    fn manager(start: i64) -> LayoutManager<TestRecycler> {
        let mut manager = LayoutManager::bottom(restrictions(), TestRecycler::default());
        manager.set_start_layout_from_adapter_position(AdapterPosition::new(start));
        manager
    }

    fn layout(manager: &LayoutManager<TestRecycler>) -> Vec<(i64, f64)> {
        manager
            .sectors()
            .map(|s| (*s.params.adapter_position, s.params.angle_position_rad))
            .collect()
    }

    #[test]
    fn test_regular_pass_fills_from_gap_edge() {
        let mut manager = manager(5);
        let cursor = manager.layout_children_regular(10);

        assert_eq!(cursor.child_pos, AdapterPosition::new(3));
        assert_eq!(cursor.layouted_children_count, 2);
        assert_eq!(layout(&manager), vec![(5, 1.0), (4, 0.5)]);
        assert!(
            manager
                .computation_helper()
                .sector_top_edge_angle_rad(cursor.layout_angle_rad)
                <= manager.layout_end_angle_rad()
        );
        assert_eq!(manager.layout_start_angle_rad(), 1.0);

        let first = manager.child_closest_to_layout_start_edge().unwrap();
        let last = manager.child_closest_to_layout_end_edge().unwrap();
        assert_eq!(first.params.adapter_position, AdapterPosition::new(5));
        assert_eq!(last.params.adapter_position, AdapterPosition::new(4));
    }

    #[test]
    fn test_regular_pass_without_items() {
        let mut manager = manager(5);
        let cursor = manager.layout_children_regular(0);

        assert_eq!(cursor.child_pos, AdapterPosition::new(5));
        assert_eq!(cursor.layouted_children_count, 0);
        assert_eq!(manager.child_count(), 0);
        assert!(manager.recycler().acquired.is_empty());
    }

    #[test]
    fn test_regular_pass_stops_when_items_run_out() {
        let mut manager = manager(0);
        let cursor = manager.layout_children_regular(1);

        assert_eq!(cursor.layouted_children_count, 1);
        assert_eq!(cursor.child_pos, AdapterPosition::new(-1));
        assert_eq!(layout(&manager), vec![(0, 1.0)]);
    }

    #[test]
    fn test_regular_pass_recycles_previous_sectors() {
        let mut manager = manager(5);
        manager.layout_children_regular(10);
        manager.layout_children_regular(10);

        assert_eq!(manager.recycler().released, 2);
        assert_eq!(manager.child_count(), 2);
    }

    #[test]
    fn test_pass_iterations_are_bounded() {
        let cases = [
            (3.0, 0.0, 1.0, 0.5),
            (1.0, -1.0, 0.3, 0.07),
            (0.2, -3.0, -0.4, 0.33),
            (5.0, 0.0, 0.0, 0.25),
        ];

        for (top, bottom, gap_bottom, sector) in cases {
            let restrictions = AngularRestrictions::new(RestrictionBounds {
                wheel_top_edge_angle_rad: top,
                wheel_bottom_edge_angle_rad: bottom,
                gap_area_top_edge_angle_rad: gap_bottom,
                gap_area_bottom_edge_angle_rad: gap_bottom,
                sector_angle_rad: sector,
            })
            .unwrap();
            let mut manager = LayoutManager::bottom(restrictions, TestRecycler::default());
            let cursor = manager.layout_children_regular(1000);

            assert!(cursor.layouted_children_count <= restrictions.max_visible_sectors());
            assert!(cursor.layouted_children_count < 1000);
            assert!(cursor.layout_angle_rad <= bottom);
        }
    }

    #[test]
    fn test_startup_pass_fills_from_wheel_top() {
        let mut manager = manager(5);
        let cursor = manager.layout_children_for_startup_animation(10);

        assert_eq!(cursor.child_pos, AdapterPosition::new(-1));
        assert_eq!(
            layout(&manager),
            vec![(5, 3.0), (4, 2.5), (3, 2.0), (2, 1.5), (1, 1.0), (0, 0.5)]
        );
        assert!(!manager.is_startup_animation_running());
    }

    #[test]
    fn test_initial_layout_notifies_once() {
        let resting = Rc::new(RefCell::new(Vec::new()));
        let mut manager = manager(5);
        let sink = resting.clone();
        manager.set_initial_layout_finishing_listener(move |p: AdapterPosition| sink.borrow_mut().push(p));

        let cursor = manager.on_layout_children(10);
        assert_eq!(*resting.borrow(), vec![cursor.child_pos.previous()]);
        assert_eq!(*resting.borrow(), vec![AdapterPosition::new(-2)]);
        assert!(manager.is_startup_animation_running());

        manager.on_layout_children(10);
        assert_eq!(resting.borrow().len(), 1);
        assert!(!manager.is_startup_animation_running());
    }

    fn record_statuses(
        manager: &mut LayoutManager<TestRecycler>,
    ) -> Rc<RefCell<Vec<WheelStartupAnimationStatus>>> {
        let statuses = Rc::new(RefCell::new(Vec::new()));
        let sink = statuses.clone();
        manager.set_startup_animation_listener(move |s: WheelStartupAnimationStatus| {
            sink.borrow_mut().push(s)
        });
        statuses
    }

    #[test]
    fn test_startup_animation_settles_on_gap_edge() {
        let mut manager = manager(5);
        let statuses = record_statuses(&mut manager);

        manager.on_layout_children(10);
        assert_eq!(*statuses.borrow(), vec![WheelStartupAnimationStatus::Start]);

        let frame = Duration::from_millis(16);
        let mut frames = 0;
        while manager.tick(frame) {
            frames += 1;
            assert!(frames < 1000, "animation never finished");
        }

        let statuses = statuses.borrow();
        let (first, rest) = statuses.split_first().unwrap();
        let (last, middle) = rest.split_last().unwrap();
        assert_eq!(*first, WheelStartupAnimationStatus::Start);
        assert_eq!(*last, WheelStartupAnimationStatus::Finished);
        assert!(
            middle
                .iter()
                .all(|s| *s == WheelStartupAnimationStatus::InProgress)
        );

        let anchor = manager.child_closest_to_layout_start_edge().unwrap();
        assert_eq!(anchor.params.adapter_position, AdapterPosition::new(5));
        assert_relative_eq!(anchor.params.angle_position_rad, 1.0, epsilon = 1e-9);
        assert_eq!(manager.child_count(), 2);
        assert_eq!(manager.recycler().released, 4);

        let end = manager.layout_end_angle_rad();
        assert!(manager.sectors().all(|s| s.params.angle_position_rad > end));
    }

    #[test]
    fn test_ticks_after_finish_are_silent() {
        let mut manager = manager(5);
        let statuses = record_statuses(&mut manager);

        manager.on_layout_children(10);
        while manager.tick(Duration::from_millis(250)) {}
        let seen = statuses.borrow().len();
        let before = layout(&manager);

        assert!(!manager.tick(Duration::from_millis(250)));
        assert_eq!(statuses.borrow().len(), seen);
        assert_eq!(layout(&manager), before);
    }

    #[test]
    fn test_cancel_stops_all_callbacks() {
        let mut manager = manager(5);
        let statuses = record_statuses(&mut manager);

        manager.on_layout_children(10);
        manager.tick(Duration::from_millis(100));
        manager.tick(Duration::from_millis(100));
        manager.cancel_startup_animation();

        let seen = statuses.borrow().clone();
        let frozen = layout(&manager);
        assert!(!manager.tick(Duration::from_millis(100)));
        assert!(!manager.tick(Duration::from_secs(5)));

        assert_eq!(*statuses.borrow(), seen);
        assert!(!seen.contains(&WheelStartupAnimationStatus::Finished));
        assert_eq!(layout(&manager), frozen);
    }

    #[test]
    fn test_relayout_during_startup_finishes_animation() {
        let mut manager = manager(5);
        let statuses = record_statuses(&mut manager);

        manager.on_layout_children(10);
        manager.tick(Duration::from_millis(100));
        manager.on_layout_children(10);
        assert!(!manager.is_startup_animation_running());
        while manager.tick(Duration::from_millis(16)) {}

        let statuses = statuses.borrow();
        assert_eq!(statuses.first(), Some(&WheelStartupAnimationStatus::Start));
        assert_eq!(statuses.last(), Some(&WheelStartupAnimationStatus::Finished));
        let finished = statuses
            .iter()
            .filter(|s| **s == WheelStartupAnimationStatus::Finished)
            .count();
        assert_eq!(finished, 1);
        assert_eq!(layout(&manager), vec![(5, 1.0), (4, 0.5)]);
    }

    #[test]
    fn test_settle_onto_wheel_bottom_matches_regular_pass() {
        let restrictions = AngularRestrictions::new(RestrictionBounds {
            wheel_top_edge_angle_rad: 3.0,
            wheel_bottom_edge_angle_rad: 0.0,
            gap_area_top_edge_angle_rad: 1.0,
            gap_area_bottom_edge_angle_rad: 0.0,
            sector_angle_rad: 0.5,
        })
        .unwrap();
        let mut manager = LayoutManager::bottom(restrictions, TestRecycler::default());
        manager.set_start_layout_from_adapter_position(AdapterPosition::new(5));
        let statuses = record_statuses(&mut manager);

        manager.on_layout_children(10);
        let mut frames = 0;
        while manager.tick(Duration::from_millis(16)) {
            frames += 1;
            assert!(frames < 1000, "animation never finished");
        }
        let settled = layout(&manager);
        assert_eq!(
            statuses.borrow().last(),
            Some(&WheelStartupAnimationStatus::Finished)
        );

        manager.layout_children_regular(10);
        assert_eq!(settled, layout(&manager));
        assert!(settled.is_empty());
    }

    #[test]
    fn test_detach_releases_everything() {
        let mut manager = manager(5);
        manager.on_layout_children(10);
        manager.detach();

        assert_eq!(manager.child_count(), 0);
        assert_eq!(manager.recycler().released, 6);
        assert!(!manager.tick(Duration::from_millis(16)));
    }

    #[test]
    fn test_no_animation_without_items() {
        let mut manager = manager(5);
        let statuses = record_statuses(&mut manager);

        let cursor = manager.on_layout_children(0);
        assert_eq!(cursor.child_pos, AdapterPosition::new(5));
        assert!(!manager.is_startup_animation_running());
        assert!(statuses.borrow().is_empty());
    }

    #[test]
    fn test_rotation_refills_start_edge() {
        let mut manager = manager(5);
        manager.layout_children_regular(10);

        manager.rotate_wheel_by(RotationDirection::Clockwise, 0.25);
        let rotated = layout(&manager);
        let expected = [(6, 1.25), (5, 0.75), (4, 0.25)];
        assert_eq!(rotated.len(), expected.len());
        for ((pos, angle), (want_pos, want_angle)) in rotated.iter().zip(expected) {
            assert_eq!(*pos, want_pos);
            assert_relative_eq!(*angle, want_angle, epsilon = 1e-12);
        }

        manager.rotate_wheel_by(RotationDirection::Anticlockwise, 0.25);
        let restored = layout(&manager);
        assert_eq!(restored.len(), 2);
        assert_eq!(restored[0].0, 5);
        assert_relative_eq!(restored[0].1, 1.0, epsilon = 1e-12);
        assert_eq!(restored[1].0, 4);
        assert_eq!(manager.recycler().released, 1);
    }

    #[test]
    fn test_negative_delta_flips_direction() {
        let mut a = manager(5);
        let mut b = manager(5);
        a.layout_children_regular(10);
        b.layout_children_regular(10);

        a.rotate_wheel_by(RotationDirection::Clockwise, -0.3);
        b.rotate_wheel_by(RotationDirection::Anticlockwise, 0.3);

        assert_eq!(layout(&a), layout(&b));
    }

    #[test]
    fn test_large_rotation_reseeds_sequence() {
        let mut manager = manager(5);
        manager.layout_children_regular(10);

        manager.rotate_wheel_by(RotationDirection::Clockwise, 5.0);
        let rotated = layout(&manager);
        assert_eq!(rotated.len(), 2);
        assert_eq!(rotated[0].0, 15);
        assert_relative_eq!(rotated[0].1, 1.0, epsilon = 1e-9);
        assert_eq!(rotated[1].0, 14);

        manager.rotate_wheel_by(RotationDirection::Anticlockwise, 5.0);
        let restored = layout(&manager);
        assert_eq!(restored.len(), 2);
        assert_eq!(restored[0].0, 5);
        assert_relative_eq!(restored[0].1, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_absurd_rotation_keeps_arc_filled() {
        let mut manager = manager(5);
        manager.layout_children_regular(10);

        manager.rotate_wheel_by(RotationDirection::Clockwise, 1e300);
        let (start, end) = (manager.layout_start_angle_rad(), manager.layout_end_angle_rad());
        let rotated = layout(&manager);
        assert!((2..=3).contains(&rotated.len()));
        assert!(
            rotated
                .iter()
                .all(|(_, angle)| *angle > end && *angle <= start + 0.5 + 1e-9)
        );

        manager.rotate_wheel_by(RotationDirection::Anticlockwise, 1e300);
        assert!(manager.child_count() >= 1);
    }

    #[test]
    fn test_rotation_respects_item_count() {
        let mut manager = manager(0);
        manager.layout_children_regular(1);

        manager.rotate_wheel_by(RotationDirection::Clockwise, 0.25);
        assert_eq!(manager.child_count(), 1);
    }

    #[test]
    fn test_rotation_ignored_during_startup() {
        let mut manager = manager(5);
        manager.on_layout_children(10);
        let before = layout(&manager);

        manager.rotate_wheel_by(RotationDirection::Clockwise, 0.5);
        assert_eq!(layout(&manager), before);
    }
}
