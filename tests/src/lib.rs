//! Fixture-driven tests spanning ingestion, matrix assembly and ranking.

mod ingestion;
mod pipeline;

#[cfg(test)]
pub(crate) mod fixtures {
    pub const OFFICE_XML: &str = include_str!("../fixtures/small_office.xml");
    pub const OFFICE_CSV: &str = include_str!("../fixtures/small_office.csv");
    pub const REGROUPED_CSV: &str = include_str!("../fixtures/regrouped.csv");
    pub const BAD_PORT_CSV: &str = include_str!("../fixtures/bad_port.csv");
    pub const TRUNCATED_XML: &str = include_str!("../fixtures/truncated.xml");
}
