use crate::error::CheckError;
use crate::util::table::Table;
use serde::Serialize;

/// Status of one pool, lifted from a single `zpool list` row.
///
/// Column text is kept verbatim — status messages quote the original
/// unit-suffixed strings. Numeric views are provided by accessors.
/// Built once per check and never modified afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct PoolStatus {
    pub name:     String,
    pub health:   String,            // "ONLINE", "DEGRADED", "FAULTED", ...
    pub cap:      Option<String>,    // "43%"
    pub size:     Option<String>,    // "2.72T"
    pub alloc:    Option<String>,
    pub free:     Option<String>,
    pub expandsz: Option<String>,
    pub frag:     Option<String>,    // "11%"
    pub dedup:    Option<String>,    // "1.00x"
    pub altroot:  Option<String>,
}

/// Confirm the requested pool appears in the all-pools listing.
pub fn assert_pool_listed(table: &Table, name: &str) -> Result<(), CheckError> {
    let col = table
        .column("NAME")
        .ok_or(CheckError::MissingRequiredField("NAME"))?;
    if table.rows.iter().any(|row| row[col] == name) {
        Ok(())
    } else {
        Err(CheckError::PoolNotFound(name.to_string()))
    }
}

impl PoolStatus {
    /// Map the pool-scoped listing onto the pool schema, by header name.
    ///
    /// Columns we do not know (CKPOINT on newer zpool releases) are ignored;
    /// known columns absent from the header leave their field unset. NAME,
    /// HEALTH and CAP must be present.
    pub fn from_listing(table: &Table, name: &str) -> Result<PoolStatus, CheckError> {
        let name_col = table
            .column("NAME")
            .ok_or(CheckError::MissingRequiredField("NAME"))?;
        let health_col = table
            .column("HEALTH")
            .ok_or(CheckError::MissingRequiredField("HEALTH"))?;
        if table.column("CAP").is_none() {
            return Err(CheckError::MissingCapacityField);
        }

        let row = table
            .rows
            .iter()
            .find(|row| row[name_col] == name)
            .ok_or_else(|| CheckError::PoolNotFound(name.to_string()))?;

        let cell = |col: &str| table.column(col).map(|i| row[i].clone());

        Ok(PoolStatus {
            name:     row[name_col].clone(),
            health:   row[health_col].clone(),
            cap:      cell("CAP"),
            size:     cell("SIZE"),
            alloc:    cell("ALLOC"),
            free:     cell("FREE"),
            expandsz: cell("EXPANDSZ"),
            frag:     cell("FRAG"),
            dedup:    cell("DEDUP"),
            altroot:  cell("ALTROOT"),
        })
    }

    /// Capacity as an integer percent, if the CAP text parses.
    pub fn cap_percent(&self) -> Option<i64> {
        percent(self.cap.as_deref()?)
    }

    /// Fragmentation as an integer percent, if the FRAG text parses.
    /// Old zpool releases print "-" here; that yields None.
    pub fn frag_percent(&self) -> Option<i64> {
        percent(self.frag.as_deref()?)
    }
}

fn percent(raw: &str) -> Option<i64> {
    raw.trim().trim_end_matches('%').parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
NAME   SIZE  ALLOC   FREE  CKPOINT  EXPANDSZ   FRAG    CAP  DEDUP  HEALTH  ALTROOT
tank  2.72T  1.19T  1.53T        -         -    11%    43%  1.00x  ONLINE  -
";

    #[test]
    fn maps_columns_by_header_name() {
        let table = Table::parse(LISTING);
        let pool = PoolStatus::from_listing(&table, "tank").unwrap();
        assert_eq!(pool.name, "tank");
        assert_eq!(pool.health, "ONLINE");
        assert_eq!(pool.cap.as_deref(), Some("43%"));
        assert_eq!(pool.size.as_deref(), Some("2.72T"));
        assert_eq!(pool.alloc.as_deref(), Some("1.19T"));
        assert_eq!(pool.free.as_deref(), Some("1.53T"));
        assert_eq!(pool.frag.as_deref(), Some("11%"));
        assert_eq!(pool.dedup.as_deref(), Some("1.00x"));
        assert_eq!(pool.altroot.as_deref(), Some("-"));
    }

    #[test]
    fn unknown_columns_are_ignored_and_absent_ones_left_unset() {
        let table = Table::parse("NAME HEALTH CAP WEIRD\ntank ONLINE 43% x\n");
        let pool = PoolStatus::from_listing(&table, "tank").unwrap();
        assert!(pool.size.is_none());
        assert!(pool.frag.is_none());
    }

    #[test]
    fn missing_name_or_health_column_fails() {
        let table = Table::parse("SIZE CAP HEALTH\n2.72T 43% ONLINE\n");
        assert!(matches!(
            PoolStatus::from_listing(&table, "tank"),
            Err(CheckError::MissingRequiredField("NAME"))
        ));

        let table = Table::parse("NAME SIZE CAP\ntank 2.72T 43%\n");
        assert!(matches!(
            PoolStatus::from_listing(&table, "tank"),
            Err(CheckError::MissingRequiredField("HEALTH"))
        ));
    }

    #[test]
    fn missing_cap_column_fails_distinctly() {
        let table = Table::parse("NAME HEALTH\ntank ONLINE\n");
        assert!(matches!(
            PoolStatus::from_listing(&table, "tank"),
            Err(CheckError::MissingCapacityField)
        ));
    }

    #[test]
    fn pool_lookup_in_generic_listing() {
        let table = Table::parse("NAME SIZE\ntank 2.72T\nbackup 928G\n");
        assert!(assert_pool_listed(&table, "backup").is_ok());
        assert!(matches!(
            assert_pool_listed(&table, "nosuch"),
            Err(CheckError::PoolNotFound(name)) if name == "nosuch"
        ));
    }

    #[test]
    fn empty_output_reads_as_missing_name_column() {
        let table = Table::parse("");
        assert!(matches!(
            assert_pool_listed(&table, "tank"),
            Err(CheckError::MissingRequiredField("NAME"))
        ));
    }

    #[test]
    fn percent_accessors() {
        let table = Table::parse(LISTING);
        let pool = PoolStatus::from_listing(&table, "tank").unwrap();
        assert_eq!(pool.cap_percent(), Some(43));
        assert_eq!(pool.frag_percent(), Some(11));

        let dash = Table::parse("NAME HEALTH CAP FRAG\ntank ONLINE 43% -\n");
        let pool = PoolStatus::from_listing(&dash, "tank").unwrap();
        assert_eq!(pool.frag_percent(), None);
    }
}
