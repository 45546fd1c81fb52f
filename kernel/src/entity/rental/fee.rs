use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::{DailyRentalRate, DateOut, DateReturned};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct RentalFee(i64);

impl RentalFee {
    pub fn new(fee: impl Into<i64>) -> Self {
        Self(fee.into())
    }

    /// Whole elapsed days (partial days are dropped) times the daily rate.
    pub fn calculate(
        date_out: &DateOut,
        date_returned: &DateReturned,
        rate: &DailyRentalRate,
    ) -> Self {
        let elapsed = *date_returned.as_ref() - *date_out.as_ref();
        let days = elapsed.whole_days().max(0);
        Self(days * i64::from(*rate.as_ref()))
    }
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};

    use crate::entity::{DailyRentalRate, DateOut, DateReturned, RentalFee};

    #[test]
    fn partial_days_are_truncated() {
        let out = OffsetDateTime::now_utc();
        let fee = RentalFee::calculate(
            &DateOut::new(out),
            &DateReturned::new(out + Duration::days(2) + Duration::hours(23)),
            &DailyRentalRate::new(4),
        );
        assert_eq!(fee, RentalFee::new(8));
    }

    #[test]
    fn never_negative() {
        let out = OffsetDateTime::now_utc();
        let fee = RentalFee::calculate(
            &DateOut::new(out),
            &DateReturned::new(out - Duration::days(1)),
            &DailyRentalRate::new(4),
        );
        assert_eq!(fee, RentalFee::new(0));
    }
}
