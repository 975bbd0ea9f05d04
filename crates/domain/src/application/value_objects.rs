//! Value objects for the placement application domain.

use serde::{Deserialize, Serialize};

/// Product identifier as reported by the brand's store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new product ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the product ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Network-wide unique machine identifier (e.g. `MACH-001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MachineId(String);

impl MachineId {
    /// Creates a new machine ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the machine ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MachineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for MachineId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MachineId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for MachineId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Divides and rounds half towards positive infinity.
///
/// `denominator` must be positive.
pub(crate) fn round_half_up(numerator: i64, denominator: i64) -> i64 {
    (2 * numerator + denominator).div_euclid(2 * denominator)
}

/// Money amount in pence to avoid floating point issues.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money {
    pence: i64,
}

impl Money {
    /// Creates a new Money amount from pence.
    pub fn from_pence(pence: i64) -> Self {
        Self { pence }
    }

    /// Creates a new Money amount from whole pounds.
    pub fn from_pounds(pounds: i64) -> Self {
        Self {
            pence: pounds * 100,
        }
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { pence: 0 }
    }

    /// Returns the amount in pence.
    pub fn pence(&self) -> i64 {
        self.pence
    }

    /// Returns the pound portion (whole number, truncated towards zero).
    pub fn pounds(&self) -> i64 {
        self.pence / 100
    }

    /// Returns the pence portion (remainder after pounds).
    pub fn pence_part(&self) -> i64 {
        self.pence.abs() % 100
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        self.pence > 0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.pence == 0
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.pence < 0
    }

    /// Multiplies by a quantity.
    pub fn multiply(&self, quantity: u64) -> Money {
        Money {
            pence: self.pence * quantity as i64,
        }
    }

    /// Rounds to the nearest whole pound, halves rounding up.
    pub fn round_to_pound(&self) -> Money {
        Money::from_pounds(round_half_up(self.pence, 100))
    }

    /// Scales by `basis_points / 10_000` and rounds to the nearest whole pound.
    pub fn scale_to_pound(&self, basis_points: u32) -> Money {
        Money::from_pounds(round_half_up(
            self.pence * i64::from(basis_points),
            100 * 10_000,
        ))
    }

    /// Divides into `parts` and rounds each part to the nearest whole pound.
    ///
    /// Dividing by zero parts yields zero.
    pub fn split_to_pound(&self, parts: u64) -> Money {
        if parts == 0 {
            return Money::zero();
        }
        Money::from_pounds(round_half_up(self.pence, 100 * parts as i64))
    }

    /// Takes `percent` of the amount, rounded to the nearest penny.
    pub fn percent(&self, percent: u32) -> Money {
        Money::from_pence(round_half_up(self.pence * i64::from(percent), 100))
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.pence < 0 {
            write!(f, "-£{}.{:02}", self.pounds().abs(), self.pence_part())
        } else {
            write!(f, "£{}.{:02}", self.pounds(), self.pence_part())
        }
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            pence: self.pence + rhs.pence,
        }
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money {
            pence: self.pence - rhs.pence,
        }
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.pence += rhs.pence;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Foot-traffic-based pricing band of a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    /// All tiers, lowest first.
    pub const ALL: [Tier; 3] = [Tier::Low, Tier::Medium, Tier::High];

    /// Returns the inclusive 6-month price band for this tier, in whole pounds.
    pub fn price_band(&self) -> (Money, Money) {
        match self {
            Tier::Low => (Money::from_pounds(600), Money::from_pounds(800)),
            Tier::Medium => (Money::from_pounds(800), Money::from_pounds(1000)),
            Tier::High => (Money::from_pounds(1000), Money::from_pounds(1500)),
        }
    }

    /// Returns true if a 6-month price falls inside this tier's band.
    pub fn admits_price(&self, price: Money) -> bool {
        let (low, high) = self.price_band();
        price >= low && price <= high
    }

    /// Returns the tier name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Low => "low",
            Tier::Medium => "medium",
            Tier::High => "high",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Tier::Low),
            "medium" => Ok(Tier::Medium),
            "high" => Ok(Tier::High),
            other => Err(format!("unknown tier '{other}'")),
        }
    }
}

/// Geographic position of a machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Contracted length of a campaign, in months.
///
/// Any month count is representable so that pricing can apply its
/// fallback; the duration step only accepts [`CampaignDuration::OFFERED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignDuration(u32);

impl CampaignDuration {
    pub const ONE_MONTH: CampaignDuration = CampaignDuration(1);
    pub const THREE_MONTHS: CampaignDuration = CampaignDuration(3);
    pub const SIX_MONTHS: CampaignDuration = CampaignDuration(6);
    pub const TWELVE_MONTHS: CampaignDuration = CampaignDuration(12);

    /// Durations a brand can choose from.
    pub const OFFERED: [CampaignDuration; 4] = [
        Self::ONE_MONTH,
        Self::THREE_MONTHS,
        Self::SIX_MONTHS,
        Self::TWELVE_MONTHS,
    ];

    /// Creates a duration of the given number of months.
    pub fn from_months(months: u32) -> Self {
        Self(months)
    }

    /// Returns the number of months.
    pub fn months(&self) -> u32 {
        self.0
    }

    /// Returns true if this is one of the offered durations.
    pub fn is_offered(&self) -> bool {
        Self::OFFERED.contains(self)
    }
}

impl Default for CampaignDuration {
    fn default() -> Self {
        Self::SIX_MONTHS
    }
}

impl std::fmt::Display for CampaignDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 1 {
            write!(f, "1 month")
        } else {
            write!(f, "{} months", self.0)
        }
    }
}
