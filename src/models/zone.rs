use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Timezone a deployment groups its hours and days in.
///
/// A named zone follows daylight saving, so the offset of a sample depends on its instant.
/// Every sample still carries the offset in effect at that instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReferenceZone {
    Fixed(FixedOffset),
    Named(Tz),
}

impl ReferenceZone {
    pub fn utc() -> ReferenceZone {
        ReferenceZone::Fixed(Utc.fix())
    }

    /// Expresses an instant in the zone, with the offset in effect at that instant
    ///
    /// # Arguments
    ///
    /// * 'instant' - the instant to express, in any timezone
    pub fn localize<Z: TimeZone>(&self, instant: &DateTime<Z>) -> DateTime<FixedOffset> {
        match self {
            ReferenceZone::Fixed(offset) => instant.with_timezone(offset),
            ReferenceZone::Named(tz) => {
                let local = instant.with_timezone(tz);
                local.with_timezone(&local.offset().fix())
            },
        }
    }
}

impl From<FixedOffset> for ReferenceZone {
    fn from(offset: FixedOffset) -> Self { ReferenceZone::Fixed(offset) }
}

impl From<Tz> for ReferenceZone {
    fn from(tz: Tz) -> Self { ReferenceZone::Named(tz) }
}
