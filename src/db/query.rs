//! Query parameter helpers.

use cozo::DataValue;

use super::backend::Params;

/// Bind `values` as `$k0`, `$k1`, ... for scripts built by
/// `CozoCompiler::compile_key_lookup`.
pub fn key_params(values: &[DataValue]) -> Params {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (format!("k{}", i), v.clone()))
        .collect()
}

/// Bind rows as the `$rows` list read by insert scripts.
pub fn rows_param(rows: Vec<Vec<DataValue>>) -> Params {
    let mut params = Params::new();
    params.insert(
        "rows".to_string(),
        DataValue::List(rows.into_iter().map(DataValue::List).collect()),
    );
    params
}
