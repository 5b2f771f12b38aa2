use crate::error::CheckError;
use crate::models::pool::PoolStatus;
use crate::util::units;
use std::fmt;

/// Nagios plugin severity scale. The ordinal doubles as the exit code, and
/// aggregation is a plain maximum, so the order of the variants matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Ok       => "OK",
            Severity::Warning  => "WARNING",
            Severity::Critical => "CRITICAL",
            Severity::Unknown  => "UNKNOWN",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Severity::Ok       => 0,
            Severity::Warning  => 1,
            Severity::Critical => 2,
            Severity::Unknown  => 3,
        }
    }
}

/// Capacity thresholds in percent.
///
/// Each must independently be within 0..=100. warn <= crit is deliberately
/// not enforced; supervisor configs with inverted thresholds still get a
/// verdict.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub warn: i64,
    pub crit: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { warn: 50, crit: 80 }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), CheckError> {
        let range = 0..=100;
        if range.contains(&self.warn) && range.contains(&self.crit) {
            Ok(())
        } else {
            Err(CheckError::ArgumentRange)
        }
    }
}

/// Pool health string → (severity, perfdata ordinal).
/// Strings outside this table leave the severity untouched and report
/// ordinal -1.
const HEALTH_STATES: [(&str, Severity, i32); 6] = [
    ("ONLINE",   Severity::Ok,       0),
    ("OFFLINE",  Severity::Warning,  1),
    ("REMOVED",  Severity::Warning,  2),
    ("UNAVAIL",  Severity::Warning,  3),
    ("DEGRADED", Severity::Critical, 4),
    ("FAULTED",  Severity::Critical, 5),
];

/// One `key=value;warn;crit` perfdata sample. Empty warn/crit fields are
/// legal; size samples additionally carry a trailing empty min field.
#[derive(Debug, Clone, PartialEq)]
pub struct PerfDatum {
    pub key:   &'static str,
    pub value: String,
    pub warn:  String,
    pub crit:  String,
    min_field: bool,
}

impl PerfDatum {
    fn new(key: &'static str, value: String, warn: String, crit: String) -> Self {
        Self { key, value, warn, crit, min_field: false }
    }

    fn size(key: &'static str, gigabytes: f64) -> Self {
        Self {
            key,
            value: format!("{}GB", gigabytes),
            warn:  String::new(),
            crit:  String::new(),
            min_field: true,
        }
    }
}

impl fmt::Display for PerfDatum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={};{};{}", self.key, self.value, self.warn, self.crit)?;
        if self.min_field {
            write!(f, ";")?;
        }
        Ok(())
    }
}

/// Outcome of one metric: how bad it is, an optional message fragment, and
/// an optional perfdata sample. The aggregator supplies fallback fragments
/// for sections whose check stayed quiet.
#[derive(Debug, Default)]
struct Verdict {
    severity: Option<Severity>,
    fragment: Option<String>,
    perf:     Option<PerfDatum>,
}

/// Final verdict for the whole pool: worst severity seen, message fragments
/// in their fixed order, perfdata samples in theirs.
#[derive(Debug)]
pub struct Evaluation {
    pub severity: Severity,
    pub message:  Vec<String>,
    pub perfdata: Vec<PerfDatum>,
}

impl Evaluation {
    /// The one-line plugin report: `<SEVERITY>: <message> | <perfdata>`.
    pub fn render(&self) -> String {
        let perf: Vec<String> = self.perfdata.iter().map(|p| p.to_string()).collect();
        format!(
            "{}: {} | {}",
            self.severity.label(),
            self.message.join(", "),
            perf.join(" ")
        )
    }
}

/// Evaluate every metric of a pool and fold the verdicts into one report.
///
/// Severity is the maximum over the health and capacity checks; the other
/// metrics only contribute message text and perfdata. Message order is
/// fixed: POOL, STATUS, SIZE, ALLOC, FREE, FRAG, CAP — where STATUS and CAP
/// use the checking verdict's fragment when it set one and a neutral
/// fallback otherwise, so each section appears exactly once. Perfdata order
/// is fixed too: frag, cap, size, alloc, free, health.
pub fn evaluate(pool: &PoolStatus, thresholds: Thresholds) -> Result<Evaluation, CheckError> {
    let health   = check_health(pool);
    let capacity = check_capacity(pool, thresholds)?;
    let size  = size_metric("size", "SIZE", pool.size.as_deref())?;
    let alloc = size_metric("alloc", "ALLOC", pool.alloc.as_deref())?;
    let free  = size_metric("free", "FREE", pool.free.as_deref())?;
    let frag  = check_frag(pool);

    let severity = [&health, &capacity, &size, &alloc, &free, &frag]
        .iter()
        .filter_map(|v| v.severity)
        .fold(Severity::Ok, Severity::max);

    let mut message = vec![format!("POOL: {}", pool.name)];
    message.push(
        health
            .fragment
            .clone()
            .unwrap_or_else(|| format!("STATUS: {}", pool.health)),
    );
    for verdict in [&size, &alloc, &free] {
        if let Some(fragment) = &verdict.fragment {
            message.push(fragment.clone());
        }
    }
    if let Some(raw) = &pool.frag {
        // The frag check never writes its own fragment (see check_frag).
        message.push(frag.fragment.clone().unwrap_or_else(|| format!("FRAG: {}", raw)));
    }
    if let Some(raw) = &pool.cap {
        message.push(
            capacity
                .fragment
                .clone()
                .unwrap_or_else(|| format!("CAP: {}", raw)),
        );
    }

    let perfdata = [frag, capacity, size, alloc, free, health]
        .into_iter()
        .filter_map(|v| v.perf)
        .collect();

    Ok(Evaluation { severity, message, perfdata })
}

/// Health is checked unconditionally and always reports perfdata. The
/// fragment is only set when the state raised the severity; for a healthy
/// pool the aggregator appends the STATUS text itself.
fn check_health(pool: &PoolStatus) -> Verdict {
    let entry = HEALTH_STATES.iter().find(|(state, _, _)| *state == pool.health);
    let (severity, ordinal) = match entry {
        Some((_, severity, ordinal)) => (*severity, *ordinal),
        None                         => (Severity::Ok, -1),
    };

    let fragment = if severity > Severity::Ok {
        Some(format!("STATUS: {}", pool.health))
    } else {
        None
    };

    Verdict {
        severity: Some(severity),
        fragment,
        perf: Some(PerfDatum::new(
            "health",
            ordinal.to_string(),
            "1".to_string(),
            "3".to_string(),
        )),
    }
}

/// Capacity compares integer percents: above crit is critical, above warn
/// is a warning, equal to either threshold is still fine.
fn check_capacity(pool: &PoolStatus, thresholds: Thresholds) -> Result<Verdict, CheckError> {
    let Some(raw) = pool.cap.as_deref() else {
        return Ok(Verdict::default());
    };
    let percent = pool.cap_percent().ok_or(CheckError::MissingCapacityField)?;

    let (severity, fragment) = if percent > thresholds.crit {
        (Severity::Critical, Some(format!("CAP CRIT: {}", raw)))
    } else if percent > thresholds.warn {
        (Severity::Warning, Some(format!("CAP WARN: {}", raw)))
    } else {
        (Severity::Ok, None)
    };

    Ok(Verdict {
        severity: Some(severity),
        fragment,
        perf: Some(PerfDatum::new(
            "cap",
            format!("{}%", percent),
            thresholds.warn.to_string(),
            thresholds.crit.to_string(),
        )),
    })
}

/// SIZE/ALLOC/FREE never affect severity: the message quotes the original
/// unit-suffixed text, the perfdata carries the converted gigabyte value.
fn size_metric(
    key: &'static str,
    label: &str,
    raw: Option<&str>,
) -> Result<Verdict, CheckError> {
    let Some(raw) = raw else {
        return Ok(Verdict::default());
    };
    let gigabytes = units::to_gb(raw)?;

    Ok(Verdict {
        severity: None,
        fragment: Some(format!("{}: {}", label, raw)),
        perf:     Some(PerfDatum::size(key, gigabytes)),
    })
}

/// Fragmentation is surfaced in perfdata only. No thresholds are applied
/// and no fragment is written, so it never drives the severity.
/// TODO: add --frag-warn/--frag-crit once fragmentation alerting is wanted.
fn check_frag(pool: &PoolStatus) -> Verdict {
    let Some(percent) = pool.frag_percent() else {
        return Verdict::default();
    };
    Verdict {
        severity: None,
        fragment: None,
        perf: Some(PerfDatum::new(
            "frag",
            format!("{}%", percent),
            String::new(),
            String::new(),
        )),
    }
}
