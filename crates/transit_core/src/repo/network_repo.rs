//! Reference network repository: companies, bus lines, stations, buses,
//! crew and zones.
//!
//! # Responsibility
//! - List and look up the seeded reference rows that populate pickers.
//! - Provide checked inserts used by the fixture routine.
//!
//! # Invariants
//! - BusLine requires an existing Company; Station and Bus require an
//!   existing BusLine; Crew requires an existing Bus.
//! - Lists are returned in key order (integer keys) or insertion order
//!   (text keys).

use crate::model::money::Money;
use crate::model::network::{
    Bus, BusLine, BusLineId, Company, CompanyName, Crew, CrewId, Station, StationNumber, Zone,
    ZoneId,
};
use crate::repo::error::{EntityKind, ReferenceField, RepoResult};
use crate::repo::support::{
    bool_to_int, ensure_absent, ensure_connection_ready, ensure_reference, int_to_bool,
    map_write_error, Key,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

const BUS_LINE_SELECT_SQL: &str = "SELECT
    bus_line_id,
    route,
    name,
    length_km,
    company_name,
    seats,
    crew_count,
    in_service
FROM bus_lines";

const BUS_SELECT_SQL: &str = "SELECT
    bus_number,
    bus_line_id,
    seats,
    crew_count,
    in_service
FROM buses";

/// Read access and checked inserts for the reference network.
pub trait NetworkRepository {
    fn create_company(&self, company: &Company) -> RepoResult<CompanyName>;
    fn create_bus_line(&self, bus_line: &BusLine) -> RepoResult<BusLineId>;
    fn create_station(&self, station: &Station) -> RepoResult<StationNumber>;
    fn create_bus(&self, bus: &Bus) -> RepoResult<String>;
    fn create_crew(&self, crew: &Crew) -> RepoResult<CrewId>;
    fn create_zone(&self, zone: &Zone) -> RepoResult<ZoneId>;

    fn list_companies(&self) -> RepoResult<Vec<Company>>;
    fn list_bus_lines(&self) -> RepoResult<Vec<BusLine>>;
    fn list_stations(&self) -> RepoResult<Vec<Station>>;
    fn list_buses(&self) -> RepoResult<Vec<Bus>>;
    fn list_crew(&self) -> RepoResult<Vec<Crew>>;
    fn list_zones(&self) -> RepoResult<Vec<Zone>>;

    fn get_bus_line(&self, id: BusLineId) -> RepoResult<Option<BusLine>>;
    fn get_station(&self, number: StationNumber) -> RepoResult<Option<Station>>;
    fn get_bus(&self, number: &str) -> RepoResult<Option<Bus>>;
    fn get_zone(&self, id: ZoneId) -> RepoResult<Option<Zone>>;
}

/// SQLite-backed reference network repository.
pub struct SqliteNetworkRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNetworkRepository<'conn> {
    /// Constructs a repository over a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl NetworkRepository for SqliteNetworkRepository<'_> {
    fn create_company(&self, company: &Company) -> RepoResult<CompanyName> {
        company.validate()?;
        let key = Key::Text(&company.name);
        ensure_absent(self.conn, EntityKind::Company, key)?;

        self.conn
            .execute(
                "INSERT INTO companies (company_name, vat) VALUES (?1, ?2);",
                params![company.name, company.vat],
            )
            .map_err(|err| map_write_error(err, EntityKind::Company, key))?;
        Ok(company.name.clone())
    }

    fn create_bus_line(&self, bus_line: &BusLine) -> RepoResult<BusLineId> {
        bus_line.validate()?;
        let key = Key::Int(bus_line.id);
        ensure_absent(self.conn, EntityKind::BusLine, key)?;
        ensure_reference(self.conn, ReferenceField::Company, Key::Text(&bus_line.company))?;

        self.conn
            .execute(
                "INSERT INTO bus_lines (
                    bus_line_id,
                    route,
                    name,
                    length_km,
                    company_name,
                    seats,
                    crew_count,
                    in_service
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
                params![
                    bus_line.id,
                    bus_line.route,
                    bus_line.name,
                    bus_line.length_km,
                    bus_line.company,
                    bus_line.seats,
                    bus_line.crew_count,
                    bool_to_int(bus_line.in_service),
                ],
            )
            .map_err(|err| map_write_error(err, EntityKind::BusLine, key))?;
        Ok(bus_line.id)
    }

    fn create_station(&self, station: &Station) -> RepoResult<StationNumber> {
        station.validate()?;
        let key = Key::Int(station.number);
        ensure_absent(self.conn, EntityKind::Station, key)?;
        ensure_reference(self.conn, ReferenceField::BusLine, Key::Int(station.bus_line))?;

        self.conn
            .execute(
                "INSERT INTO stations (station_number, name, bus_line_id) VALUES (?1, ?2, ?3);",
                params![station.number, station.name, station.bus_line],
            )
            .map_err(|err| map_write_error(err, EntityKind::Station, key))?;
        Ok(station.number)
    }

    fn create_bus(&self, bus: &Bus) -> RepoResult<String> {
        bus.validate()?;
        let key = Key::Text(&bus.number);
        ensure_absent(self.conn, EntityKind::Bus, key)?;
        ensure_reference(self.conn, ReferenceField::BusLine, Key::Int(bus.bus_line))?;

        self.conn
            .execute(
                "INSERT INTO buses (bus_number, bus_line_id, seats, crew_count, in_service)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    bus.number,
                    bus.bus_line,
                    bus.seats,
                    bus.crew_count,
                    bool_to_int(bus.in_service),
                ],
            )
            .map_err(|err| map_write_error(err, EntityKind::Bus, key))?;
        Ok(bus.number.clone())
    }

    fn create_crew(&self, crew: &Crew) -> RepoResult<CrewId> {
        crew.validate()?;
        let key = Key::Int(crew.id);
        ensure_absent(self.conn, EntityKind::Crew, key)?;
        ensure_reference(self.conn, ReferenceField::Bus, Key::Text(&crew.bus))?;

        self.conn
            .execute(
                "INSERT INTO crew (crew_id, role, name, bus_number) VALUES (?1, ?2, ?3, ?4);",
                params![crew.id, crew.role, crew.name, crew.bus],
            )
            .map_err(|err| map_write_error(err, EntityKind::Crew, key))?;
        Ok(crew.id)
    }

    fn create_zone(&self, zone: &Zone) -> RepoResult<ZoneId> {
        zone.validate()?;
        let key = Key::Int(zone.id);
        ensure_absent(self.conn, EntityKind::Zone, key)?;

        self.conn
            .execute(
                "INSERT INTO zones (zone_id, price_cents) VALUES (?1, ?2);",
                params![zone.id, zone.price.cents()],
            )
            .map_err(|err| map_write_error(err, EntityKind::Zone, key))?;
        Ok(zone.id)
    }

    fn list_companies(&self) -> RepoResult<Vec<Company>> {
        let mut stmt = self
            .conn
            .prepare("SELECT company_name, vat FROM companies ORDER BY rowid ASC;")?;
        let companies = stmt
            .query_map([], |row| {
                Ok(Company {
                    name: row.get(0)?,
                    vat: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(companies)
    }

    fn list_bus_lines(&self) -> RepoResult<Vec<BusLine>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BUS_LINE_SELECT_SQL} ORDER BY bus_line_id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut bus_lines = Vec::new();
        while let Some(row) = rows.next()? {
            bus_lines.push(parse_bus_line_row(row)?);
        }
        Ok(bus_lines)
    }

    fn list_stations(&self) -> RepoResult<Vec<Station>> {
        let mut stmt = self.conn.prepare(
            "SELECT station_number, name, bus_line_id FROM stations ORDER BY station_number ASC;",
        )?;
        let stations = stmt
            .query_map([], parse_station_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(stations)
    }

    fn list_buses(&self) -> RepoResult<Vec<Bus>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BUS_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut buses = Vec::new();
        while let Some(row) = rows.next()? {
            buses.push(parse_bus_row(row)?);
        }
        Ok(buses)
    }

    fn list_crew(&self) -> RepoResult<Vec<Crew>> {
        let mut stmt = self
            .conn
            .prepare("SELECT crew_id, role, name, bus_number FROM crew ORDER BY crew_id ASC;")?;
        let crew = stmt
            .query_map([], |row| {
                Ok(Crew {
                    id: row.get(0)?,
                    role: row.get(1)?,
                    name: row.get(2)?,
                    bus: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(crew)
    }

    fn list_zones(&self) -> RepoResult<Vec<Zone>> {
        let mut stmt = self
            .conn
            .prepare("SELECT zone_id, price_cents FROM zones ORDER BY zone_id ASC;")?;
        let zones = stmt
            .query_map([], parse_zone_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(zones)
    }

    fn get_bus_line(&self, id: BusLineId) -> RepoResult<Option<BusLine>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BUS_LINE_SELECT_SQL} WHERE bus_line_id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_bus_line_row(row)?)),
            None => Ok(None),
        }
    }

    fn get_station(&self, number: StationNumber) -> RepoResult<Option<Station>> {
        let station = self
            .conn
            .query_row(
                "SELECT station_number, name, bus_line_id FROM stations WHERE station_number = ?1;",
                [number],
                parse_station_row,
            )
            .optional()?;
        Ok(station)
    }

    fn get_bus(&self, number: &str) -> RepoResult<Option<Bus>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BUS_SELECT_SQL} WHERE bus_number = ?1;"))?;
        let mut rows = stmt.query([number])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_bus_row(row)?)),
            None => Ok(None),
        }
    }

    fn get_zone(&self, id: ZoneId) -> RepoResult<Option<Zone>> {
        let zone = self
            .conn
            .query_row(
                "SELECT zone_id, price_cents FROM zones WHERE zone_id = ?1;",
                [id],
                parse_zone_row,
            )
            .optional()?;
        Ok(zone)
    }
}

fn parse_bus_line_row(row: &Row<'_>) -> RepoResult<BusLine> {
    Ok(BusLine {
        id: row.get("bus_line_id")?,
        route: row.get("route")?,
        name: row.get("name")?,
        length_km: row.get("length_km")?,
        company: row.get("company_name")?,
        seats: row.get("seats")?,
        crew_count: row.get("crew_count")?,
        in_service: int_to_bool(row.get("in_service")?, "bus_lines.in_service")?,
    })
}

fn parse_bus_row(row: &Row<'_>) -> RepoResult<Bus> {
    Ok(Bus {
        number: row.get("bus_number")?,
        bus_line: row.get("bus_line_id")?,
        seats: row.get("seats")?,
        crew_count: row.get("crew_count")?,
        in_service: int_to_bool(row.get("in_service")?, "buses.in_service")?,
    })
}

fn parse_station_row(row: &Row<'_>) -> rusqlite::Result<Station> {
    Ok(Station {
        number: row.get(0)?,
        name: row.get(1)?,
        bus_line: row.get(2)?,
    })
}

fn parse_zone_row(row: &Row<'_>) -> rusqlite::Result<Zone> {
    Ok(Zone {
        id: row.get(0)?,
        price: Money::from_cents(row.get(1)?),
    })
}
