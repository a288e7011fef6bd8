//! Static location reference data: airports, metro codes, and the alias
//! table used for free-text city lookups. Read-only after initialization.

use std::collections::HashMap;
use std::sync::LazyLock;

/// One airport or metro-area entry in the reference table.
#[derive(Debug, PartialEq, Eq)]
pub struct LocationEntry {
    pub code: &'static str,
    pub name: &'static str,
    pub city: &'static str,
    pub country: &'static str,
    /// Constituent airports, non-empty only for metro codes.
    pub airports: &'static [&'static str],
}

impl LocationEntry {
    pub fn is_metro(&self) -> bool {
        !self.airports.is_empty()
    }

    /// Multi-line card describing the entry, listing constituent airports
    /// for metro codes.
    pub fn describe(&self) -> String {
        let mut out = format!(
            "Airport Code: {}\nAirport Name: {}\nCity: {}\nCountry: {}\n",
            self.code, self.name, self.city, self.country
        );
        if self.is_metro() {
            out.push_str("\nThis city code represents multiple airports:\n");
            for code in self.airports {
                if let Some(airport) = entry_for_code(code) {
                    out.push_str(&format!("- {}: {}\n", airport.code, airport.name));
                }
            }
        }
        out
    }
}

macro_rules! entry {
    ($code:literal, $name:literal, $city:literal, $country:literal) => {
        LocationEntry { code: $code, name: $name, city: $city, country: $country, airports: &[] }
    };
    ($code:literal, $name:literal, $city:literal, $country:literal, $airports:expr) => {
        LocationEntry { code: $code, name: $name, city: $city, country: $country, airports: $airports }
    };
}

pub static LOCATIONS: &[LocationEntry] = &[
    // Major US airports
    entry!("ATL", "Hartsfield-Jackson Atlanta International Airport", "Atlanta", "United States"),
    entry!("LAX", "Los Angeles International Airport", "Los Angeles", "United States"),
    entry!("ORD", "O'Hare International Airport", "Chicago", "United States"),
    entry!("DFW", "Dallas/Fort Worth International Airport", "Dallas", "United States"),
    entry!("DEN", "Denver International Airport", "Denver", "United States"),
    entry!("JFK", "John F. Kennedy International Airport", "New York", "United States"),
    entry!("SFO", "San Francisco International Airport", "San Francisco", "United States"),
    entry!("SEA", "Seattle-Tacoma International Airport", "Seattle", "United States"),
    entry!("LAS", "Harry Reid International Airport", "Las Vegas", "United States"),
    entry!("MCO", "Orlando International Airport", "Orlando", "United States"),
    entry!("EWR", "Newark Liberty International Airport", "Newark", "United States"),
    entry!("MIA", "Miami International Airport", "Miami", "United States"),
    entry!("PHX", "Phoenix Sky Harbor International Airport", "Phoenix", "United States"),
    entry!("IAH", "George Bush Intercontinental Airport", "Houston", "United States"),
    entry!("BOS", "Boston Logan International Airport", "Boston", "United States"),
    entry!("DTW", "Detroit Metropolitan Wayne County Airport", "Detroit", "United States"),
    entry!("MSP", "Minneapolis-Saint Paul International Airport", "Minneapolis", "United States"),
    entry!("LGA", "LaGuardia Airport", "New York", "United States"),
    entry!("PHL", "Philadelphia International Airport", "Philadelphia", "United States"),
    entry!("CLT", "Charlotte Douglas International Airport", "Charlotte", "United States"),
    entry!("IAD", "Washington Dulles International Airport", "Washington", "United States"),
    entry!("DCA", "Ronald Reagan Washington National Airport", "Washington", "United States"),
    entry!("BWI", "Baltimore/Washington International Airport", "Baltimore", "United States"),
    entry!("MDW", "Chicago Midway International Airport", "Chicago", "United States"),
    entry!("SAN", "San Diego International Airport", "San Diego", "United States"),
    entry!("TPA", "Tampa International Airport", "Tampa", "United States"),
    entry!("PDX", "Portland International Airport", "Portland", "United States"),
    entry!("STL", "St. Louis Lambert International Airport", "St. Louis", "United States"),
    entry!("MCI", "Kansas City International Airport", "Kansas City", "United States"),
    entry!("CLE", "Cleveland Hopkins International Airport", "Cleveland", "United States"),
    // Major international airports
    entry!("LHR", "London Heathrow Airport", "London", "United Kingdom"),
    entry!("LGW", "London Gatwick Airport", "London", "United Kingdom"),
    entry!("STN", "London Stansted Airport", "London", "United Kingdom"),
    entry!("LTN", "London Luton Airport", "London", "United Kingdom"),
    entry!("LCY", "London City Airport", "London", "United Kingdom"),
    entry!("CDG", "Charles de Gaulle Airport", "Paris", "France"),
    entry!("ORY", "Paris Orly Airport", "Paris", "France"),
    entry!("AMS", "Amsterdam Airport Schiphol", "Amsterdam", "Netherlands"),
    entry!("FRA", "Frankfurt Airport", "Frankfurt", "Germany"),
    entry!("MUC", "Munich Airport", "Munich", "Germany"),
    entry!("ZRH", "Zurich Airport", "Zurich", "Switzerland"),
    entry!("VIE", "Vienna International Airport", "Vienna", "Austria"),
    entry!("MAD", "Adolfo Suarez Madrid-Barajas Airport", "Madrid", "Spain"),
    entry!("BCN", "Josep Tarradellas Barcelona-El Prat Airport", "Barcelona", "Spain"),
    entry!("FCO", "Leonardo da Vinci-Fiumicino Airport", "Rome", "Italy"),
    entry!("MXP", "Milan Malpensa Airport", "Milan", "Italy"),
    entry!("IST", "Istanbul Airport", "Istanbul", "Turkey"),
    entry!("DXB", "Dubai International Airport", "Dubai", "United Arab Emirates"),
    entry!("DOH", "Hamad International Airport", "Doha", "Qatar"),
    entry!("AUH", "Abu Dhabi International Airport", "Abu Dhabi", "United Arab Emirates"),
    entry!("HKG", "Hong Kong International Airport", "Hong Kong", "China"),
    entry!("ICN", "Incheon International Airport", "Seoul", "South Korea"),
    entry!("SIN", "Singapore Changi Airport", "Singapore", "Singapore"),
    entry!("KUL", "Kuala Lumpur International Airport", "Kuala Lumpur", "Malaysia"),
    entry!("BKK", "Suvarnabhumi Airport", "Bangkok", "Thailand"),
    entry!("NRT", "Narita International Airport", "Tokyo", "Japan"),
    entry!("HND", "Tokyo Haneda Airport", "Tokyo", "Japan"),
    entry!("PEK", "Beijing Capital International Airport", "Beijing", "China"),
    entry!("PVG", "Shanghai Pudong International Airport", "Shanghai", "China"),
    entry!("CAN", "Guangzhou Baiyun International Airport", "Guangzhou", "China"),
    entry!("SYD", "Sydney Airport", "Sydney", "Australia"),
    entry!("MEL", "Melbourne Airport", "Melbourne", "Australia"),
    entry!("AKL", "Auckland Airport", "Auckland", "New Zealand"),
    entry!("YYZ", "Toronto Pearson International Airport", "Toronto", "Canada"),
    entry!("YVR", "Vancouver International Airport", "Vancouver", "Canada"),
    entry!("YUL", "Montreal-Trudeau International Airport", "Montreal", "Canada"),
    entry!("YYC", "Calgary International Airport", "Calgary", "Canada"),
    entry!("MEX", "Mexico City International Airport", "Mexico City", "Mexico"),
    entry!("GRU", "Sao Paulo/Guarulhos International Airport", "Sao Paulo", "Brazil"),
    entry!("GIG", "Rio de Janeiro/Galeao International Airport", "Rio de Janeiro", "Brazil"),
    entry!("EZE", "Ezeiza International Airport", "Buenos Aires", "Argentina"),
    entry!("JNB", "O.R. Tambo International Airport", "Johannesburg", "South Africa"),
    entry!("CPT", "Cape Town International Airport", "Cape Town", "South Africa"),
    entry!("CAI", "Cairo International Airport", "Cairo", "Egypt"),
    // City codes for areas with multiple airports
    entry!("NYC", "All New York City airports", "New York", "United States", &["JFK", "LGA", "EWR"]),
    entry!("LON", "All London airports", "London", "United Kingdom", &["LHR", "LGW", "STN", "LTN", "LCY"]),
    entry!("PAR", "All Paris airports", "Paris", "France", &["CDG", "ORY"]),
    entry!("TYO", "All Tokyo airports", "Tokyo", "Japan", &["NRT", "HND"]),
    entry!("CHI", "All Chicago airports", "Chicago", "United States", &["ORD", "MDW"]),
    entry!("WAS", "All Washington DC airports", "Washington", "United States", &["IAD", "DCA", "BWI"]),
    entry!("MIL", "All Milan airports", "Milan", "Italy", &["MXP", "LIN"]),
    entry!("BER", "All Berlin airports", "Berlin", "Germany", &["BER", "TXL", "SXF"]),
];

/// Normalized free-text phrases mapping to a reference code.
pub static ALIASES: &[(&str, &str)] = &[
    ("new york", "NYC"),
    ("nyc", "NYC"),
    ("los angeles", "LAX"),
    ("la", "LAX"),
    ("chicago", "CHI"),
    ("san francisco", "SFO"),
    ("san fran", "SFO"),
    ("sf", "SFO"),
    ("washington", "WAS"),
    ("washington dc", "WAS"),
    ("dc", "WAS"),
    ("london", "LON"),
    ("paris", "PAR"),
    ("tokyo", "TYO"),
    ("new york city", "NYC"),
    ("washington d.c.", "WAS"),
    ("san diego", "SAN"),
    ("dallas", "DFW"),
    ("toronto", "YYZ"),
    ("vancouver", "YVR"),
    ("montreal", "YUL"),
    ("sydney", "SYD"),
    ("beijing", "PEK"),
    ("shanghai", "PVG"),
    ("bangkok", "BKK"),
    ("singapore", "SIN"),
    ("seoul", "ICN"),
    ("hong kong", "HKG"),
    ("dubai", "DXB"),
    ("amsterdam", "AMS"),
    ("frankfurt", "FRA"),
    ("munich", "MUC"),
    ("zurich", "ZRH"),
    ("madrid", "MAD"),
    ("barcelona", "BCN"),
    ("rome", "FCO"),
    ("milan", "MIL"),
    ("istanbul", "IST"),
];

static CODE_INDEX: LazyLock<HashMap<&'static str, &'static LocationEntry>> =
    LazyLock::new(|| LOCATIONS.iter().map(|e| (e.code, e)).collect());

static ALIAS_INDEX: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ALIASES.iter().copied().collect());

/// Look up an entry by its exact (uppercase) code.
pub fn entry_for_code(code: &str) -> Option<&'static LocationEntry> {
    CODE_INDEX.get(code).copied()
}

/// Look up an alias phrase (already lowercased) and return its entry.
pub fn entry_for_alias(phrase: &str) -> Option<&'static LocationEntry> {
    ALIAS_INDEX.get(phrase).and_then(|code| entry_for_code(code))
}
