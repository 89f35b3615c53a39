//! INFO column decoding and the QC metrics carried in it.

use std::collections::HashMap;

use pgxr_core::models::QcMetrics;

pub const KM_KEY: &str = "KM";
pub const KFP_KEY: &str = "KFP";
pub const KFF_KEY: &str = "KFF";
pub const MTD_KEY: &str = "MTD";

/// One INFO entry: `key=value` or a bare flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoField<'a> {
    Value(&'a str),
    Flag,
}

///
/// Split an INFO column into its entries. `.` and the empty string mean no
/// entries. Later duplicates of a key win.
///
pub fn parse_info(info: &str) -> HashMap<&str, InfoField<'_>> {
    let mut fields = HashMap::new();
    if info == "." || info.is_empty() {
        return fields;
    }

    for token in info.split(';').filter(|t| !t.is_empty()) {
        match token.split_once('=') {
            Some((key, value)) => fields.insert(key, InfoField::Value(value)),
            None => fields.insert(token, InfoField::Flag),
        };
    }

    fields
}

///
/// Build the QC metrics from parsed INFO entries. Unknown keys are ignored, as
/// are recognized keys whose values do not parse.
///
pub fn qc_metrics(fields: &HashMap<&str, InfoField<'_>>) -> QcMetrics {
    QcMetrics {
        km: value_of(fields, KM_KEY).and_then(|v| v.parse::<f64>().ok()),
        kfp: value_of(fields, KFP_KEY).and_then(|v| v.parse::<i64>().ok()),
        kff: value_of(fields, KFF_KEY).and_then(|v| v.parse::<i64>().ok()),
        mtd_methods: value_of(fields, MTD_KEY)
            .map(|v| {
                v.split(',')
                    .filter(|m| !m.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn value_of<'a>(fields: &HashMap<&str, InfoField<'a>>, key: &str) -> Option<&'a str> {
    match fields.get(key) {
        Some(InfoField::Value(v)) => Some(*v),
        _ => None,
    }
}
