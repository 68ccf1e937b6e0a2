//! Presentation helpers applied to the service's responses.
//!
//! None of these fail: they reshape values positionally and fall back to the
//! input (or an empty string) when it does not have the expected shape.

use chrono::{DateTime, NaiveDateTime};
use log::warn;

pub const SIGNING_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S %:z";

/// Substring by character position that yields an empty string when out of
/// range rather than panicking. `len` of `None` takes the rest.
fn piece(value: &str, start: usize, len: Option<usize>) -> String {
    let rest = value.chars().skip(start);
    match len {
        Some(len) => rest.take(len).collect(),
        None => rest.collect(),
    }
}

/// Format a CPF (individual taxpayer ID) as `###.###.###-##`
pub fn format_cpf(cpf: &str) -> String {
    format!(
        "{}.{}.{}-{}",
        piece(cpf, 0, Some(3)),
        piece(cpf, 3, Some(3)),
        piece(cpf, 6, Some(3)),
        piece(cpf, 9, None)
    )
}

/// Format a CNPJ (legal entity ID) as `##.###.###/####-##`
pub fn format_cnpj(cnpj: &str) -> String {
    format!(
        "{}.{}.{}/{}-{}",
        piece(cnpj, 0, Some(2)),
        piece(cnpj, 2, Some(3)),
        piece(cnpj, 5, Some(3)),
        piece(cnpj, 8, Some(4)),
        piece(cnpj, 12, None)
    )
}

/// Format an optional CPF, yielding an empty string when absent
pub fn format_optional_cpf(cpf: Option<&str>) -> String {
    cpf.map(format_cpf).unwrap_or_default()
}

/// Format an optional CNPJ, yielding an empty string when absent
pub fn format_optional_cnpj(cnpj: Option<&str>) -> String {
    cnpj.map(format_cnpj).unwrap_or_default()
}

/// Reformat an ISO 8601 timestamp as `dd/mm/yyyy hh:mm:ss ±hh:mm`, keeping
/// the offset it was reported with. Timestamps without an offset are taken
/// as UTC. Anything unparseable is returned unchanged.
pub fn format_signing_time(signing_time: &str) -> String {
    if let Ok(date_time) = DateTime::parse_from_rfc3339(signing_time) {
        return date_time.format(SIGNING_TIME_FORMAT).to_string();
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(signing_time, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.and_utc().format(SIGNING_TIME_FORMAT).to_string();
    }

    warn!("Could not parse signing time: {}", signing_time);
    signing_time.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

    #[cfg(target_arch = "wasm32")]
    wasm_bindgen_test_configure!(run_in_browser);

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    #[cfg_attr(not(target_arch = "wasm32"), test)]
    fn it_formats_cpf() {
        assert_eq!(format_cpf("12345678901"), "123.456.789-01");
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    #[cfg_attr(not(target_arch = "wasm32"), test)]
    fn it_formats_cnpj() {
        assert_eq!(format_cnpj("12345678000195"), "12.345.678/0001-95");
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    #[cfg_attr(not(target_arch = "wasm32"), test)]
    fn it_formats_ids_of_unexpected_length_positionally() {
        assert_eq!(format_cpf("1234"), "123.4..-");
        assert_eq!(format_cpf(""), "..-");
        assert_eq!(format_cpf("1234567890123"), "123.456.789-0123");
        assert_eq!(format_cnpj("123"), "12.3../-");
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    #[cfg_attr(not(target_arch = "wasm32"), test)]
    fn it_yields_empty_strings_for_missing_ids() {
        assert_eq!(format_optional_cpf(None), "");
        assert_eq!(format_optional_cnpj(None), "");
        assert_eq!(format_optional_cpf(Some("12345678901")), "123.456.789-01");
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    #[cfg_attr(not(target_arch = "wasm32"), test)]
    fn it_formats_signing_time_keeping_its_offset() {
        assert_eq!(
            format_signing_time("2017-03-21T14:07:45-03:00"),
            "21/03/2017 14:07:45 -03:00"
        );
        assert_eq!(
            format_signing_time("2020-12-01T08:00:00.1234567Z"),
            "01/12/2020 08:00:00 +00:00"
        );
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    #[cfg_attr(not(target_arch = "wasm32"), test)]
    fn it_treats_signing_time_without_offset_as_utc() {
        assert_eq!(
            format_signing_time("2019-07-04T23:59:01"),
            "04/07/2019 23:59:01 +00:00"
        );
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    #[cfg_attr(not(target_arch = "wasm32"), test)]
    fn it_leaves_unparseable_signing_time_untouched() {
        assert_eq!(format_signing_time("yesterday"), "yesterday");
    }
}
