use foundation::time::Time;

/// One tick of the host's per-frame update loop.
///
/// Hosts rarely deliver a fixed delta, so a frame carries the delta it was
/// advanced by and the accumulated engine time.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Seconds since the previous frame.
    pub dt_s: f64,
    /// Engine time at the end of this frame.
    pub time: Time,
}

impl Frame {
    /// Frame `index` of a fixed-rate clock.
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    pub fn first() -> Self {
        Self {
            index: 0,
            dt_s: 0.0,
            time: Time::ZERO,
        }
    }

    /// Next frame after `dt_s` seconds. Negative or NaN deltas count as zero.
    pub fn advance(self, dt_s: f64) -> Self {
        let dt_s = if dt_s.is_finite() { dt_s.max(0.0) } else { 0.0 };
        Self {
            index: self.index + 1,
            dt_s,
            time: self.time + dt_s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;
    use foundation::time::Time;

    #[test]
    fn fixed_rate_frames_are_deterministic() {
        let a = Frame::new(10, 1.0 / 60.0);
        let b = Frame::new(10, 1.0 / 60.0);
        assert_eq!(a, b);
        assert_eq!(a.time, Time(10.0 / 60.0));
    }

    #[test]
    fn advance_accumulates_variable_deltas() {
        let f = Frame::first().advance(0.25).advance(0.5);
        assert_eq!(f.index, 2);
        assert_eq!(f.dt_s, 0.5);
        assert_eq!(f.time, Time(0.75));
    }

    #[test]
    fn advance_ignores_bogus_deltas() {
        let f = Frame::first().advance(-1.0).advance(f64::NAN);
        assert_eq!(f.time, Time::ZERO);
        assert_eq!(f.index, 2);
    }
}
