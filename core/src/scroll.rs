//! Offset generators for scrolling text.

/// Sweeps from `min` to `max` and back forever, `resolution` pixels at a time.
/// The sweep always lands exactly on both bounds.
#[derive(Clone, Debug)]
pub struct Marquee {
    min: i32,
    max: i32,
    resolution: i32,
    value: i32,
    forward: bool,
    started: bool,
}

impl Marquee {
    pub fn new(min: i32, max: i32, resolution: i32) -> Self {
        Self {
            min,
            max,
            resolution: resolution.max(1),
            value: min,
            forward: true,
            started: false,
        }
    }
}

impl Iterator for Marquee {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        if !self.started {
            self.started = true;
            return Some(self.value);
        }
        if self.max <= self.min {
            return Some(self.min);
        }
        if self.forward {
            self.value = (self.value + self.resolution).min(self.max);
            if self.value == self.max {
                self.forward = false;
            }
        } else {
            self.value = (self.value - self.resolution).max(self.min);
            if self.value == self.min {
                self.forward = true;
            }
        }
        Some(self.value)
    }
}

/// Repeats each bound value of a marquee `pause` extra times.
#[derive(Clone, Debug)]
pub struct PauseAtEnds {
    inner: Marquee,
    pause: usize,
    remaining: usize,
    last: i32,
}

impl PauseAtEnds {
    pub fn new(inner: Marquee, pause: usize) -> Self {
        let last = inner.min;
        Self {
            inner,
            pause,
            remaining: 0,
            last,
        }
    }
}

impl Iterator for PauseAtEnds {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        if self.remaining > 0 {
            self.remaining -= 1;
            return Some(self.last);
        }
        let value = self.inner.next()?;
        if value == self.inner.min || value == self.inner.max {
            self.remaining = self.pause;
        }
        self.last = value;
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn marquee_bounces_and_hits_bounds() {
        let values: Vec<i32> = Marquee::new(0, 5, 2).take(8).collect();
        assert_eq!(values, [0, 2, 4, 5, 3, 1, 0, 2]);
    }

    #[test]
    fn marquee_with_no_room_stays_put() {
        let values: Vec<i32> = Marquee::new(3, 3, 2).take(3).collect();
        assert_eq!(values, [3, 3, 3]);
        let values: Vec<i32> = Marquee::new(0, -4, 2).take(2).collect();
        assert_eq!(values, [0, 0]);
    }

    #[test]
    fn pauses_at_both_ends() {
        let values: Vec<i32> = PauseAtEnds::new(Marquee::new(0, 4, 2), 2).take(9).collect();
        assert_eq!(values, [0, 0, 0, 2, 4, 4, 4, 2, 0]);
    }
}
