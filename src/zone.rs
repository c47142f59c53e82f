//! Time zone resolution for mapping epoch timestamps to civil time.
//!
//! The API sends no zone, so one has to be chosen. Resolution goes
//! through a chain, first hit wins:
//!
//! 1. `--tz <zone>`: explicit per-command override
//! 2. `ISS_NOW_TZ` env var: process/session level
//! 3. `time-zone` in `~/.iss-now/config.toml`
//! 4. the system zone, which varies from machine to machine
//!
//! Zone names are IANA identifiers (`Europe/Dublin`) or `UTC`.

use std::env;

use jiff::tz::TimeZone;

/// Environment variable consulted when no `--tz` flag is given.
pub const ZONE_ENV: &str = "ISS_NOW_TZ";

/// Resolve the zone from the flag, the environment, the config, or the system.
pub fn resolve_zone(explicit: Option<&str>, configured: Option<&str>) -> Result<TimeZone, String> {
    let from_env = env::var(ZONE_ENV).ok();
    resolve_zone_from(explicit, from_env.as_deref(), configured)
}

fn resolve_zone_from(
    explicit: Option<&str>,
    from_env: Option<&str>,
    configured: Option<&str>,
) -> Result<TimeZone, String> {
    // 1. Explicit --tz flag.
    if let Some(name) = explicit {
        return parse_zone(name).map_err(|e| format!("invalid --tz '{name}': {e}"));
    }

    // 2. ISS_NOW_TZ environment variable.
    if let Some(name) = from_env.filter(|s| !s.is_empty()) {
        return parse_zone(name).map_err(|e| format!("invalid {ZONE_ENV} '{name}': {e}"));
    }

    // 3. Config file.
    if let Some(name) = configured.filter(|s| !s.is_empty()) {
        return parse_zone(name).map_err(|e| format!("invalid time-zone '{name}' in config: {e}"));
    }

    Ok(TimeZone::system())
}

/// Look up a zone by name.
///
/// `UTC` is handled without consulting the tz database, so it works on
/// hosts with no zoneinfo installed.
pub fn parse_zone(name: &str) -> Result<TimeZone, jiff::Error> {
    if name.eq_ignore_ascii_case("utc") {
        return Ok(TimeZone::UTC);
    }
    TimeZone::get(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;
    use jiff::civil::date;

    fn civil_at_epoch(zone: &TimeZone) -> jiff::civil::DateTime {
        zone.to_datetime(Timestamp::UNIX_EPOCH)
    }

    #[test]
    fn utc_is_case_insensitive() {
        for name in ["UTC", "utc", "Utc"] {
            let zone = parse_zone(name).unwrap();
            assert_eq!(civil_at_epoch(&zone), date(1970, 1, 1).at(0, 0, 0, 0));
        }
    }

    #[test]
    fn explicit_wins() {
        let zone = resolve_zone_from(Some("UTC"), Some("not/a-zone"), Some("not/a-zone")).unwrap();
        assert_eq!(civil_at_epoch(&zone), date(1970, 1, 1).at(0, 0, 0, 0));
    }

    #[test]
    fn env_beats_config() {
        let zone = resolve_zone_from(None, Some("UTC"), Some("not/a-zone")).unwrap();
        assert_eq!(civil_at_epoch(&zone), date(1970, 1, 1).at(0, 0, 0, 0));
    }

    #[test]
    fn empty_env_falls_through_to_config() {
        let err = resolve_zone_from(None, Some(""), Some("not/a-zone")).unwrap_err();
        assert!(err.contains("in config"), "{err}");
    }

    #[test]
    fn unknown_zone_names_its_source() {
        let err = resolve_zone_from(Some("Mars/Olympus_Mons"), None, None).unwrap_err();
        assert!(err.starts_with("invalid --tz 'Mars/Olympus_Mons'"), "{err}");

        let err = resolve_zone_from(None, Some("Mars/Olympus_Mons"), None).unwrap_err();
        assert!(err.starts_with("invalid ISS_NOW_TZ"), "{err}");
    }

    #[test]
    fn falls_back_to_system_zone() {
        assert!(resolve_zone_from(None, None, None).is_ok());
        assert!(resolve_zone_from(None, None, Some("")).is_ok());
    }
}
