//! The fixed sequence of progress lines shown while a request is in flight

/// One scheduled progress line: what is happening, plus some flavor text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub message: String,
    pub flavor: String,
}

impl ScheduleEntry {
    pub fn new(message: impl Into<String>, flavor: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            flavor: flavor.into(),
        }
    }
}

const BOOMI_SCHEDULE: &[(&str, &str)] = &[
    ("Establishing connection with Boomi API endpoint", "[Engaging thrusters]"),
    ("Sending request JSON to Boomi API", "[Engaging hyperdrive engines]"),
    ("Setting 60-second response threshold for Boomi response", "[Optimizing response modules]"),
    ("Waiting for Boomi API response", "[Awaiting transmission]"),
    ("Response received: 200 OK", "[Received cosmic signal]"),
    ("Parsing and analyzing API response JSON", "[Processing space transmission]"),
    ("Performing data transformation and validation in Boomi", "[Analyzing launch coordinates]"),
    ("Preparing final data analysis", "[Generating atmosphere report]"),
    ("Sending response JSON to boomipulse", "[Transmitting results to mission control]"),
    ("Received confirmation: Response JSON successfully parsed", "[Receiving confirmation from mission control]"),
    ("Validating Boomi JSON format", "[Parsing stellar JSON from Boomi]"),
];

/// Ordered, read-only list of entries, one per one-second slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    pub fn new(entries: Vec<ScheduleEntry>) -> Self {
        Self { entries }
    }

    /// The mission-control themed schedule shown for every Boomi request
    pub fn boomi() -> Self {
        Self::new(
            BOOMI_SCHEDULE
                .iter()
                .map(|(message, flavor)| ScheduleEntry::new(*message, *flavor))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ScheduleEntry> {
        self.entries.get(index)
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::boomi()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boomi_schedule() {
        let schedule = Schedule::boomi();
        assert_eq!(schedule.len(), 11);
        assert_eq!(
            schedule.get(0).map(|e| e.message.as_str()),
            Some("Establishing connection with Boomi API endpoint")
        );
        assert_eq!(
            schedule.get(10).map(|e| e.flavor.as_str()),
            Some("[Parsing stellar JSON from Boomi]")
        );
        assert!(schedule.get(11).is_none());
    }
}
