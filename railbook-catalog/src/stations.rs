use railbook_shared::Station;

/// Flat lookup over the station reference list. Pure reads, no side effects.
pub struct StationDirectory {
    stations: Vec<Station>,
}

impl StationDirectory {
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    /// Directory over the built-in reference data.
    pub fn seeded() -> Self {
        Self::new(crate::seed::stations())
    }

    pub fn all(&self) -> &[Station] {
        &self.stations
    }

    /// Case-insensitive substring match on name, city, or code. Queries
    /// shorter than two characters return nothing; ordering follows the
    /// underlying list.
    pub fn search(&self, query: &str) -> Vec<&Station> {
        let term = query.trim().to_lowercase();
        if term.len() < 2 {
            return Vec::new();
        }
        self.stations
            .iter()
            .filter(|s| {
                s.name.to_lowercase().contains(&term)
                    || s.city.to_lowercase().contains(&term)
                    || s.code.to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn get_by_code(&self, code: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.code == code)
    }

    pub fn get_by_id(&self, id: i64) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }
}
