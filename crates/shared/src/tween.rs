use crate::geometry::Rect;

/// Duration of a zoom into a region, in milliseconds.
pub const ZOOM_IN_MS: f64 = 800.0;
/// Duration of a reset back to the full map, in milliseconds.
pub const RESET_MS: f64 = 600.0;

/// Cubic ease-out: decelerating to zero velocity.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t - 1.0;
    t * t * t + 1.0
}

/// A single viewport transition between two rectangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: Rect,
    pub to: Rect,
    pub started_at: f64,
    pub duration_ms: f64,
}

impl Tween {
    /// Raw progress in `[0, 1]`. A non-positive duration is already complete.
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Rectangle at `now`. The eased factor drives all four fields so the
    /// view pans and scales in lockstep; completion returns `to` exactly.
    pub fn sample(&self, now: f64) -> Rect {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to;
        }
        self.from.lerp(&self.to, ease_out_cubic(progress))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationState {
    Idle,
    Animating(Tween),
}

/// Output of one animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub rect: Rect,
    pub finished: bool,
}

/// Owns the displayed viewport rectangle and at most one in-flight tween.
#[derive(Debug, Clone)]
pub struct ViewportAnimator {
    current: Rect,
    state: AnimationState,
}

impl ViewportAnimator {
    pub fn new(initial: Rect) -> Self {
        Self {
            current: initial,
            state: AnimationState::Idle,
        }
    }

    /// The last rendered rectangle.
    pub fn current(&self) -> Rect {
        self.current
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.state, AnimationState::Animating(_))
    }

    pub fn target(&self) -> Option<Rect> {
        match self.state {
            AnimationState::Animating(tween) => Some(tween.to),
            AnimationState::Idle => None,
        }
    }

    /// Start a tween toward `target`, replacing any tween in flight.
    ///
    /// The new tween starts from the last rendered rectangle, never from the
    /// previous tween's origin or target.
    pub fn animate_to(&mut self, target: Rect, duration_ms: f64, now: f64) {
        self.state = AnimationState::Animating(Tween {
            from: self.current,
            to: target,
            started_at: now,
            duration_ms,
        });
    }

    /// Advance to `now`. Returns `None` when idle.
    pub fn advance(&mut self, now: f64) -> Option<Frame> {
        let AnimationState::Animating(tween) = self.state else {
            return None;
        };

        self.current = tween.sample(now);
        let finished = tween.progress(now) >= 1.0;
        if finished {
            self.state = AnimationState::Idle;
        }
        Some(Frame {
            rect: self.current,
            finished,
        })
    }

    /// Drop any tween in flight, keeping the current rectangle.
    pub fn stop(&mut self) {
        self.state = AnimationState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> Rect {
        Rect::native()
    }

    fn target() -> Rect {
        Rect::new(40.0, 60.0, 168.0, 111.0)
    }

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        // 1 - 0.5^3
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_ease_out_cubic_is_monotonic() {
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = ease_out_cubic(i as f64 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn test_tween_endpoints_are_exact() {
        let pairs = [
            (start(), target()),
            (target(), start()),
            (Rect::new(0.1, 0.2, 0.3, 0.4), Rect::new(999.9, 600.3, 7.7, 3.3)),
        ];
        for (from, to) in pairs {
            let tween = Tween {
                from,
                to,
                started_at: 1000.0,
                duration_ms: ZOOM_IN_MS,
            };
            assert_eq!(tween.sample(1000.0), from);
            assert_eq!(tween.sample(1800.0), to);
            assert_eq!(tween.sample(5000.0), to);
        }
    }

    #[test]
    fn test_tween_uses_eased_progress_for_all_fields() {
        let tween = Tween {
            from: start(),
            to: target(),
            started_at: 0.0,
            duration_ms: 800.0,
        };
        let r = tween.sample(400.0);
        let e = ease_out_cubic(0.5);
        let fx = (r.x - tween.from.x) / (tween.to.x - tween.from.x);
        let fy = (r.y - tween.from.y) / (tween.to.y - tween.from.y);
        let fw = (r.width - tween.from.width) / (tween.to.width - tween.from.width);
        let fh = (r.height - tween.from.height) / (tween.to.height - tween.from.height);
        for f in [fx, fy, fw, fh] {
            assert!((f - e).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let tween = Tween {
            from: start(),
            to: target(),
            started_at: 10.0,
            duration_ms: 0.0,
        };
        assert_eq!(tween.progress(10.0), 1.0);
        assert_eq!(tween.sample(10.0), target());
    }

    #[test]
    fn test_animator_idle_by_default() {
        let mut anim = ViewportAnimator::new(start());
        assert!(!anim.is_animating());
        assert_eq!(anim.advance(100.0), None);
        assert_eq!(anim.current(), start());
    }

    #[test]
    fn test_animator_runs_to_completion() {
        let mut anim = ViewportAnimator::new(start());
        anim.animate_to(target(), ZOOM_IN_MS, 0.0);
        assert!(anim.is_animating());
        assert_eq!(anim.target(), Some(target()));

        let first = anim.advance(16.0).unwrap();
        assert!(!first.finished);
        assert_ne!(first.rect, start());

        let last = anim.advance(800.0).unwrap();
        assert!(last.finished);
        assert_eq!(last.rect, target());
        assert!(!anim.is_animating());
        assert_eq!(anim.current(), target());
        assert_eq!(anim.advance(900.0), None);
    }

    #[test]
    fn test_superseding_tween_starts_from_last_rendered_frame() {
        let mut anim = ViewportAnimator::new(start());
        anim.animate_to(target(), ZOOM_IN_MS, 0.0);
        anim.advance(100.0);
        let rendered = anim.advance(300.0).unwrap().rect;

        let second = Rect::new(600.0, 300.0, 200.0, 130.0);
        anim.animate_to(second, ZOOM_IN_MS, 320.0);
        match anim.state() {
            AnimationState::Animating(t) => assert_eq!(t.from, rendered),
            AnimationState::Idle => panic!("expected animating"),
        }

        // The first sample of the new tween continues from the rendered rect.
        let next = anim.advance(320.0).unwrap();
        assert_eq!(next.rect, rendered);
        let done = anim.advance(1120.0).unwrap();
        assert_eq!(done.rect, second);
    }

    #[test]
    fn test_stop_keeps_current_rect() {
        let mut anim = ViewportAnimator::new(start());
        anim.animate_to(target(), RESET_MS, 0.0);
        let mid = anim.advance(300.0).unwrap().rect;
        anim.stop();
        assert!(!anim.is_animating());
        assert_eq!(anim.current(), mid);
    }
}
