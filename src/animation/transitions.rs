use crate::animation::easing::{lerp, EasingType};
use crate::core::geo::LatLng;
use instant::Instant;
use std::time::Duration;

/// Types of camera transitions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionType {
    /// Simple pan to a new center, zoom unchanged
    Pan,
    /// Combined pan and zoom along a straight line
    SetView,
    /// Zoom out, travel, zoom back in
    FlyTo,
}

/// State of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    NotStarted,
    Running,
    Completed,
    Cancelled,
}

/// Interpolated camera position for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub center: LatLng,
    pub zoom: f64,
}

/// A camera move between two views.
///
/// Time is always supplied by the caller, so the same transition can be
/// driven by a render loop or stepped through deterministically in tests.
#[derive(Debug, Clone)]
pub struct Transition {
    pub transition_type: TransitionType,
    pub duration: Duration,
    pub easing: EasingType,
    pub state: TransitionState,
    start_time: Option<Instant>,
    from: CameraFrame,
    to: CameraFrame,
}

impl Transition {
    pub fn new(
        transition_type: TransitionType,
        from: CameraFrame,
        to: CameraFrame,
        duration: Duration,
    ) -> Self {
        let to = match transition_type {
            TransitionType::Pan => CameraFrame {
                center: to.center,
                zoom: from.zoom,
            },
            _ => to,
        };

        Self {
            transition_type,
            duration,
            easing: EasingType::EaseInOut,
            state: TransitionState::NotStarted,
            start_time: None,
            from,
            to,
        }
    }

    /// Set the easing function
    pub fn with_easing(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }

    pub fn target(&self) -> CameraFrame {
        self.to
    }

    /// Start the transition at `now`
    pub fn start(&mut self, now: Instant) {
        if self.state == TransitionState::NotStarted {
            self.start_time = Some(now);
            self.state = TransitionState::Running;
        }
    }

    /// Stop the transition where it is
    pub fn cancel(&mut self) {
        if !self.is_finished() {
            self.state = TransitionState::Cancelled;
        }
    }

    /// Get the progress (0.0 to 1.0) at `now`
    pub fn progress(&self, now: Instant) -> f64 {
        match (self.state, self.start_time) {
            (TransitionState::Completed, _) => 1.0,
            (_, None) => 0.0,
            (_, Some(start)) => {
                if self.duration.is_zero() {
                    return 1.0;
                }
                let elapsed = now.saturating_duration_since(start).as_secs_f64();
                (elapsed / self.duration.as_secs_f64()).clamp(0.0, 1.0)
            }
        }
    }

    /// Advance to `now` and return the camera frame to render.
    ///
    /// Starts the transition on first call and flips it to `Completed` once
    /// the duration has elapsed; the completed frame is exactly the target.
    pub fn update(&mut self, now: Instant) -> Option<CameraFrame> {
        match self.state {
            TransitionState::NotStarted => {
                self.start(now);
                self.update(now)
            }
            TransitionState::Running => {
                let progress = self.progress(now);
                if progress >= 1.0 {
                    self.state = TransitionState::Completed;
                    return Some(self.to);
                }
                Some(self.frame_at(self.easing.apply(progress)))
            }
            TransitionState::Completed => Some(self.to),
            TransitionState::Cancelled => None,
        }
    }

    /// Check if the transition is finished
    pub fn is_finished(&self) -> bool {
        matches!(
            self.state,
            TransitionState::Completed | TransitionState::Cancelled
        )
    }

    pub fn is_complete(&self) -> bool {
        self.state == TransitionState::Completed
    }

    fn frame_at(&self, eased: f64) -> CameraFrame {
        let center = LatLng::new(
            lerp(self.from.center.lat, self.to.center.lat, eased),
            lerp(self.from.center.lng, self.to.center.lng, eased),
        );

        let zoom = match self.transition_type {
            TransitionType::Pan => self.from.zoom,
            TransitionType::SetView => lerp(self.from.zoom, self.to.zoom, eased),
            TransitionType::FlyTo => {
                // Parabolic arc: zoom out one level below the lower end, then back in
                let apex = self.from.zoom.min(self.to.zoom) - 1.0;
                if eased < 0.5 {
                    let t = eased * 2.0;
                    self.from.zoom - (self.from.zoom - apex) * (2.0 * t - t * t)
                } else {
                    let t = (eased - 0.5) * 2.0;
                    apex + (self.to.zoom - apex) * (t * t)
                }
            }
        };

        CameraFrame { center, zoom }
    }
}
