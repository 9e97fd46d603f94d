//! HaFAS trip document
//!
//! Typed view of the parts of the `/trip` response the sensor reads. Unknown
//! fields are ignored.

use serde::{Deserialize, Serialize};

/// Top-level `/trip` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripResponse {
    /// Trips in the order the gateway ranked them
    #[serde(rename = "Trip", default)]
    pub trips: Vec<Trip>,
}

impl TripResponse {
    /// Whether the gateway returned no trips
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

/// One planned journey
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    /// Container for the legs
    #[serde(rename = "LegList", default)]
    pub leg_list: LegList,
}

impl Trip {
    /// Legs in travel order
    #[must_use]
    pub fn legs(&self) -> &[Leg] {
        &self.leg_list.legs
    }
}

/// `LegList` wrapper object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegList {
    /// The legs
    #[serde(rename = "Leg", default)]
    pub legs: Vec<Leg>,
}

/// One directed movement between two stops
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    /// Where the leg starts
    #[serde(rename = "Origin")]
    pub origin: StopEvent,
    /// Where the leg ends
    #[serde(rename = "Destination")]
    pub destination: StopEvent,
    /// Leg type: `JNY` (vehicle journey), `WALK`, `TRSF`, ...
    #[serde(rename = "type")]
    pub leg_type: String,
    /// Product category such as `ICE`, `DRE` or `Bus`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Line number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Full line name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Leg {
    /// Line number if present, otherwise the line name
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        non_empty(self.number.as_deref()).or_else(|| self.name.as_deref())
    }
}

/// Arrival or departure at a stop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopEvent {
    /// Stop name
    pub name: String,
    /// Scheduled date, `YYYY-MM-DD`
    pub date: String,
    /// Scheduled time, `HH:MM:SS`
    pub time: String,
    /// Real-time date
    #[serde(rename = "rtDate", default, skip_serializing_if = "Option::is_none")]
    pub rt_date: Option<String>,
    /// Real-time time
    #[serde(rename = "rtTime", default, skip_serializing_if = "Option::is_none")]
    pub rt_time: Option<String>,
    /// Real-time time under the legacy key some gateways still send
    #[serde(rename = "rTime", default, skip_serializing_if = "Option::is_none")]
    pub r_time: Option<String>,
    /// Scheduled platform
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    /// Real-time platform
    #[serde(rename = "rtPlatform", default, skip_serializing_if = "Option::is_none")]
    pub rt_platform: Option<Platform>,
}

impl StopEvent {
    /// Real-time time, preferring `rtTime` over the legacy `rTime`
    #[must_use]
    pub fn realtime_time(&self) -> Option<&str> {
        non_empty(self.rt_time.as_deref()).or_else(|| non_empty(self.r_time.as_deref()))
    }

    /// Platform text, preferring the real-time platform
    #[must_use]
    pub fn platform_text(&self) -> Option<&str> {
        self.rt_platform
            .as_ref()
            .filter(|p| !p.is_blank())
            .or(self.platform.as_ref())
            .and_then(|p| p.text.as_deref())
    }
}

/// Platform descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    /// Text shown to passengers, e.g. "3" or "H.2"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Platform {
    fn is_blank(&self) -> bool {
        non_empty(self.text.as_deref()).is_none()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
