//! Operation table
//!
//! Every read endpoint is one [`Operation`]: its routes, parameters, query
//! template, result cardinality and not-found message. The router and the
//! query service both consume this table; nothing else describes an endpoint.

use crate::query::params::{ParamSpec, RangeSpec};

/// Whether an operation yields one object or a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Lookup by unique key; the first row is returned as an object
    One,
    /// Collection; all rows are returned as an array
    Many,
}

/// Declarative description of one read endpoint
#[derive(Debug)]
pub struct Operation {
    /// Stable identifier, used in logs
    pub name: &'static str,
    /// Route patterns (axum syntax) served by this operation
    pub routes: &'static [&'static str],
    /// One-line description shown on the index route
    pub description: &'static str,
    /// Path parameters in placeholder order
    pub params: &'static [ParamSpec],
    /// Optional `start <= end` constraint
    pub range: Option<RangeSpec>,
    /// Parameterized query template
    pub sql: &'static str,
    /// Result cardinality
    pub cardinality: Cardinality,
    /// Not-found message template with `{param}` placeholders
    pub not_found: &'static str,
}

impl Operation {
    /// Look up an operation by name
    pub fn by_name(name: &str) -> Option<&'static Operation> {
        OPERATIONS.iter().find(|op| op.name == name)
    }
}

const CIRCUIT_REF: ParamSpec = ParamSpec::text("ref", "Circuit ref");
const CONSTRUCTOR_REF: ParamSpec = ParamSpec::text("ref", "Constructor ref");
const DRIVER_REF: ParamSpec = ParamSpec::text("ref", "Driver ref");
const RACE_ID: ParamSpec = ParamSpec::integer("raceId", "Race id");
const YEAR: ParamSpec = ParamSpec::integer("year", "Season year");
const ROUND: ParamSpec = ParamSpec::integer("round", "Round");
const START_YEAR: ParamSpec = ParamSpec::integer("start", "Start year");
const END_YEAR: ParamSpec = ParamSpec::integer("end", "End year");

const YEAR_RANGE: RangeSpec = RangeSpec {
    start: "start",
    end: "end",
};

/// All read operations
pub static OPERATIONS: &[Operation] = &[
    Operation {
        name: "list_circuits",
        routes: &["/circuits"],
        description: "All circuits",
        params: &[],
        range: None,
        sql: "SELECT circuitId, circuitRef, name, location, country, lat, lng, url \
              FROM circuits",
        cardinality: Cardinality::Many,
        not_found: "No circuits found",
    },
    Operation {
        name: "get_circuit",
        routes: &["/circuits/:ref"],
        description: "Circuit by reference",
        params: &[CIRCUIT_REF],
        range: None,
        sql: "SELECT circuitId, circuitRef, name, location, country, lat, lng, url \
              FROM circuits WHERE circuitRef = ?",
        cardinality: Cardinality::One,
        not_found: "Circuit '{ref}' not found",
    },
    Operation {
        name: "circuits_for_season",
        routes: &["/circuits/season/:year"],
        description: "Circuits raced in a season, by round",
        params: &[YEAR],
        range: None,
        sql: "SELECT c.circuitId, c.circuitRef, c.name, c.location, c.country, c.lat, c.lng, c.url \
              FROM circuits c \
              INNER JOIN races r ON r.circuitId = c.circuitId \
              WHERE r.year = ? \
              ORDER BY r.round ASC",
        cardinality: Cardinality::Many,
        not_found: "No circuits found for season {year}",
    },
    Operation {
        name: "list_constructors",
        routes: &["/constructors"],
        description: "All constructors",
        params: &[],
        range: None,
        sql: "SELECT constructorId, constructorRef, name, nationality, url FROM constructors",
        cardinality: Cardinality::Many,
        not_found: "No constructors found",
    },
    Operation {
        name: "get_constructor",
        routes: &["/constructors/:ref"],
        description: "Constructor by reference",
        params: &[CONSTRUCTOR_REF],
        range: None,
        sql: "SELECT constructorId, constructorRef, name, nationality, url \
              FROM constructors WHERE constructorRef = ?",
        cardinality: Cardinality::One,
        not_found: "Constructor '{ref}' not found",
    },
    Operation {
        name: "list_drivers",
        routes: &["/drivers"],
        description: "All drivers",
        params: &[],
        range: None,
        sql: "SELECT driverId, driverRef, number, code, forename, surname, dob, nationality, url \
              FROM drivers",
        cardinality: Cardinality::Many,
        not_found: "No drivers found",
    },
    Operation {
        name: "get_driver",
        routes: &["/drivers/:ref"],
        description: "Driver by reference",
        params: &[DRIVER_REF],
        range: None,
        sql: "SELECT driverId, driverRef, number, code, forename, surname, dob, nationality, url \
              FROM drivers WHERE driverRef = ?",
        cardinality: Cardinality::One,
        not_found: "Driver '{ref}' not found",
    },
    Operation {
        name: "search_drivers",
        routes: &["/drivers/search/:prefix", "/drivers/search"],
        description: "Drivers whose surname starts with a prefix (case-insensitive)",
        params: &[ParamSpec::prefix("prefix", "Surname prefix")],
        range: None,
        sql: "SELECT driverId, driverRef, number, code, forename, surname, dob, nationality, url \
              FROM drivers WHERE substr(surname, 1, length(?1)) = ?1 COLLATE UNICODE_NOCASE \
              ORDER BY surname ASC, forename ASC",
        cardinality: Cardinality::Many,
        not_found: "No drivers found with surname starting with '{prefix}'",
    },
    Operation {
        name: "drivers_in_race",
        routes: &["/drivers/race/:raceId"],
        description: "Drivers entered in a race, by grid position",
        params: &[RACE_ID],
        range: None,
        sql: "SELECT d.driverId, d.driverRef, d.number, d.code, d.forename, d.surname, \
              d.dob, d.nationality, d.url \
              FROM drivers d \
              INNER JOIN results res ON res.driverId = d.driverId \
              WHERE res.raceId = ? \
              ORDER BY res.grid ASC",
        cardinality: Cardinality::Many,
        not_found: "No drivers found for race {raceId}",
    },
    Operation {
        name: "get_race",
        routes: &["/races/:raceId"],
        description: "Race by id, with its circuit",
        params: &[RACE_ID],
        range: None,
        sql: "SELECT r.raceId, r.year, r.round, r.name, r.date, r.time, r.url, \
              c.name AS \"circuit.name\", c.location AS \"circuit.location\", \
              c.country AS \"circuit.country\" \
              FROM races r \
              INNER JOIN circuits c ON c.circuitId = r.circuitId \
              WHERE r.raceId = ?",
        cardinality: Cardinality::One,
        not_found: "Race {raceId} not found",
    },
    Operation {
        name: "races_in_season",
        routes: &["/races/season/:year"],
        description: "Races in a season, by round",
        params: &[YEAR],
        range: None,
        sql: "SELECT raceId, year, round, circuitId, name, date, time, url \
              FROM races WHERE year = ? \
              ORDER BY round ASC",
        cardinality: Cardinality::Many,
        not_found: "No races found for season {year}",
    },
    Operation {
        name: "race_by_round",
        routes: &["/races/season/:year/:round"],
        description: "Race by season and round",
        params: &[YEAR, ROUND],
        range: None,
        sql: "SELECT raceId, year, round, circuitId, name, date, time, url \
              FROM races WHERE year = ? AND round = ?",
        cardinality: Cardinality::One,
        not_found: "No race found for season {year} round {round}",
    },
    Operation {
        name: "races_for_circuit",
        routes: &["/races/circuits/:ref"],
        description: "Races held at a circuit, by season and round",
        params: &[CIRCUIT_REF],
        range: None,
        sql: "SELECT r.raceId, r.year, r.round, r.circuitId, r.name, r.date, r.time, r.url \
              FROM races r \
              INNER JOIN circuits c ON c.circuitId = r.circuitId \
              WHERE c.circuitRef = ? \
              ORDER BY r.year ASC, r.round ASC",
        cardinality: Cardinality::Many,
        not_found: "No races found for circuit '{ref}'",
    },
    Operation {
        name: "races_for_circuit_in_seasons",
        routes: &["/races/circuits/:ref/season/:start/:end"],
        description: "Races held at a circuit between two seasons (inclusive)",
        params: &[CIRCUIT_REF, START_YEAR, END_YEAR],
        range: Some(YEAR_RANGE),
        sql: "SELECT r.raceId, r.year, r.round, r.circuitId, r.name, r.date, r.time, r.url \
              FROM races r \
              INNER JOIN circuits c ON c.circuitId = r.circuitId \
              WHERE c.circuitRef = ? AND r.year BETWEEN ? AND ? \
              ORDER BY r.year ASC, r.round ASC",
        cardinality: Cardinality::Many,
        not_found: "No races found for circuit '{ref}' between {start} and {end}",
    },
    Operation {
        name: "race_results",
        routes: &["/results/:raceId"],
        description: "Results of a race, by grid position",
        params: &[RACE_ID],
        range: None,
        sql: "SELECT res.resultId, res.number, res.grid, res.position, res.positionText, \
              res.positionOrder, res.points, res.laps, res.time, res.milliseconds, \
              res.fastestLap, res.rank, res.fastestLapTime, res.fastestLapSpeed, res.statusId, \
              d.driverRef AS \"driver.driverRef\", d.code AS \"driver.code\", \
              d.forename AS \"driver.forename\", d.surname AS \"driver.surname\", \
              r.name AS \"race.name\", r.round AS \"race.round\", \
              r.year AS \"race.year\", r.date AS \"race.date\", \
              c.name AS \"constructor.name\", c.constructorRef AS \"constructor.constructorRef\", \
              c.nationality AS \"constructor.nationality\" \
              FROM results res \
              INNER JOIN races r ON r.raceId = res.raceId \
              INNER JOIN drivers d ON d.driverId = res.driverId \
              INNER JOIN constructors c ON c.constructorId = res.constructorId \
              WHERE res.raceId = ? \
              ORDER BY res.grid ASC",
        cardinality: Cardinality::Many,
        not_found: "No results found for race {raceId}",
    },
    Operation {
        name: "driver_results",
        routes: &["/results/drivers/:ref"],
        description: "Every result of a driver, by season and round",
        params: &[DRIVER_REF],
        range: None,
        sql: "SELECT res.resultId, res.number, res.grid, res.position, res.positionText, \
              res.positionOrder, res.points, res.laps, res.time, res.milliseconds, \
              res.fastestLap, res.rank, res.fastestLapTime, res.fastestLapSpeed, res.statusId, \
              r.name AS \"race.name\", r.round AS \"race.round\", \
              r.year AS \"race.year\", r.date AS \"race.date\", \
              c.name AS \"constructor.name\", c.constructorRef AS \"constructor.constructorRef\", \
              c.nationality AS \"constructor.nationality\" \
              FROM results res \
              INNER JOIN races r ON r.raceId = res.raceId \
              INNER JOIN drivers d ON d.driverId = res.driverId \
              INNER JOIN constructors c ON c.constructorId = res.constructorId \
              WHERE d.driverRef = ? \
              ORDER BY r.year ASC, r.round ASC",
        cardinality: Cardinality::Many,
        not_found: "No results found for driver '{ref}'",
    },
    Operation {
        name: "driver_results_in_seasons",
        routes: &["/results/drivers/:ref/seasons/:start/:end"],
        description: "Results of a driver between two seasons (inclusive)",
        params: &[DRIVER_REF, START_YEAR, END_YEAR],
        range: Some(YEAR_RANGE),
        sql: "SELECT res.resultId, res.number, res.grid, res.position, res.positionText, \
              res.positionOrder, res.points, res.laps, res.time, res.milliseconds, \
              res.fastestLap, res.rank, res.fastestLapTime, res.fastestLapSpeed, res.statusId, \
              r.name AS \"race.name\", r.round AS \"race.round\", \
              r.year AS \"race.year\", r.date AS \"race.date\", \
              c.name AS \"constructor.name\", c.constructorRef AS \"constructor.constructorRef\", \
              c.nationality AS \"constructor.nationality\" \
              FROM results res \
              INNER JOIN races r ON r.raceId = res.raceId \
              INNER JOIN drivers d ON d.driverId = res.driverId \
              INNER JOIN constructors c ON c.constructorId = res.constructorId \
              WHERE d.driverRef = ? AND r.year BETWEEN ? AND ? \
              ORDER BY r.year ASC, r.round ASC",
        cardinality: Cardinality::Many,
        not_found: "No results found for driver '{ref}' between {start} and {end}",
    },
    Operation {
        name: "race_qualifying",
        routes: &["/qualifying/:raceId"],
        description: "Qualifying of a race, by qualifying position",
        params: &[RACE_ID],
        range: None,
        sql: "SELECT q.qualifyId, q.number, q.position, q.q1, q.q2, q.q3, \
              d.driverRef AS \"driver.driverRef\", d.code AS \"driver.code\", \
              d.forename AS \"driver.forename\", d.surname AS \"driver.surname\", \
              r.name AS \"race.name\", r.round AS \"race.round\", \
              r.year AS \"race.year\", r.date AS \"race.date\", \
              c.name AS \"constructor.name\", c.constructorRef AS \"constructor.constructorRef\", \
              c.nationality AS \"constructor.nationality\" \
              FROM qualifying q \
              INNER JOIN races r ON r.raceId = q.raceId \
              INNER JOIN drivers d ON d.driverId = q.driverId \
              INNER JOIN constructors c ON c.constructorId = q.constructorId \
              WHERE q.raceId = ? \
              ORDER BY q.position ASC",
        cardinality: Cardinality::Many,
        not_found: "No qualifying found for race {raceId}",
    },
    Operation {
        name: "driver_standings",
        routes: &["/standings/drivers/:raceId"],
        description: "Driver championship standings as of a race",
        params: &[RACE_ID],
        range: None,
        sql: "SELECT s.driverStandingsId, s.raceId, s.points, s.position, s.positionText, s.wins, \
              d.driverRef AS \"driver.driverRef\", d.code AS \"driver.code\", \
              d.forename AS \"driver.forename\", d.surname AS \"driver.surname\" \
              FROM driverStandings s \
              INNER JOIN drivers d ON d.driverId = s.driverId \
              WHERE s.raceId = ? \
              ORDER BY s.position ASC",
        cardinality: Cardinality::Many,
        not_found: "No driver standings found for race {raceId}",
    },
    Operation {
        name: "constructor_standings",
        routes: &["/standings/constructors/:raceId"],
        description: "Constructor championship standings as of a race",
        params: &[RACE_ID],
        range: None,
        sql: "SELECT s.constructorStandingsId, s.raceId, s.points, s.position, s.positionText, \
              s.wins, \
              c.name AS \"constructor.name\", c.constructorRef AS \"constructor.constructorRef\", \
              c.nationality AS \"constructor.nationality\" \
              FROM constructorStandings s \
              INNER JOIN constructors c ON c.constructorId = s.constructorId \
              WHERE s.raceId = ? \
              ORDER BY s.position ASC",
        cardinality: Cardinality::Many,
        not_found: "No constructor standings found for race {raceId}",
    },
];
