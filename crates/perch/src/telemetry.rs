/*!
Motion telemetry.

Adds up how far the overlay moved between placement samples and turns that
into a "dizzy" flag on a fixed interval. Cosmetic consumers (the character
animation) read [`MotionTelemetry::is_dizzy`] and [`MotionTelemetry::x_speed`].
*/

use std::time::{Duration, Instant};

use crate::types::Point;

/// Rolling displacement accumulator.
#[derive(Debug, Clone)]
pub struct MotionTelemetry {
  threshold: f64,
  interval: Duration,
  distance_traveled: f64,
  x_speed: f64,
  dizzy: bool,
  last_sample: Point,
  next_check: Option<Instant>,
  cancelled: bool,
}

impl MotionTelemetry {
  /// `origin` is the position the first sample is measured from.
  pub const fn new(threshold: f64, interval: Duration, origin: Point) -> Self {
    Self {
      threshold,
      interval,
      distance_traveled: 0.0,
      x_speed: 0.0,
      dizzy: false,
      last_sample: origin,
      next_check: None,
      cancelled: false,
    }
  }

  /// Record the overlay position at a placement.
  pub fn record(&mut self, position: Point) {
    self.distance_traveled += self.last_sample.distance(position);
    self.x_speed = self.last_sample.x - position.x;
    self.last_sample = position;
  }

  /// Run the periodic dizzy check if it is due. The first call is always due.
  ///
  /// Returns true when a check ran.
  pub fn check(&mut self, now: Instant) -> bool {
    if self.cancelled || self.next_check.is_some_and(|next| now < next) {
      return false;
    }
    self.dizzy = self.distance_traveled > self.threshold;
    self.distance_traveled = 0.0;
    self.next_check = Some(now + self.interval);
    true
  }

  /// Stop the periodic check for good.
  pub fn cancel(&mut self) {
    self.cancelled = true;
  }

  pub const fn is_dizzy(&self) -> bool {
    self.dizzy
  }

  /// Horizontal delta of the last sample (previous x minus current x).
  pub const fn x_speed(&self) -> f64 {
    self.x_speed
  }

  /// Displacement accumulated since the last check.
  pub const fn distance_traveled(&self) -> f64 {
    self.distance_traveled
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const INTERVAL: Duration = Duration::from_secs(2);

  fn telemetry() -> MotionTelemetry {
    MotionTelemetry::new(2850.0, INTERVAL, Point::ZERO)
  }

  mod record {
    use super::*;

    #[test]
    fn accumulates_euclidean_distance() {
      let mut t = telemetry();
      t.record(Point::new(3.0, 4.0));
      t.record(Point::new(3.0, 14.0));
      assert_eq!(t.distance_traveled(), 15.0);
    }

    #[test]
    fn x_speed_is_previous_minus_current() {
      let mut t = telemetry();
      t.record(Point::new(100.0, 0.0));
      assert_eq!(t.x_speed(), -100.0, "moving right gives negative speed");
      t.record(Point::new(40.0, 0.0));
      assert_eq!(t.x_speed(), 60.0);
    }
  }

  mod dizziness {
    use super::*;

    #[test]
    fn exactly_threshold_is_not_dizzy() {
      let mut t = telemetry();
      let t0 = Instant::now();
      assert!(t.check(t0), "first check runs immediately");
      t.record(Point::new(1000.0, 0.0));
      t.record(Point::new(2850.0, 0.0));
      assert!(t.check(t0 + INTERVAL));
      assert!(!t.is_dizzy(), "threshold is strictly greater-than");
    }

    #[test]
    fn above_threshold_is_dizzy_then_resets() {
      let mut t = telemetry();
      let t0 = Instant::now();
      assert!(t.check(t0));
      t.record(Point::new(2851.0, 0.0));
      assert!(t.check(t0 + INTERVAL));
      assert!(t.is_dizzy());
      assert_eq!(t.distance_traveled(), 0.0, "accumulator resets on check");

      assert!(t.check(t0 + INTERVAL * 2));
      assert!(!t.is_dizzy(), "no new movement clears the flag");
    }

    #[test]
    fn check_is_not_due_before_interval() {
      let mut t = telemetry();
      let t0 = Instant::now();
      assert!(t.check(t0));
      t.record(Point::new(5000.0, 0.0));
      assert!(!t.check(t0 + Duration::from_millis(1999)));
      assert!(!t.is_dizzy(), "flag only changes when a check runs");
      assert_eq!(t.distance_traveled(), 5000.0);
    }

    #[test]
    fn cancelled_timer_never_fires() {
      let mut t = telemetry();
      t.cancel();
      t.record(Point::new(9000.0, 0.0));
      assert!(!t.check(Instant::now()));
      assert!(!t.is_dizzy());
    }
  }
}
