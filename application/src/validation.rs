use error_stack::Report;
use garde::Validate;
use uuid::Uuid;

use kernel::KernelError;

/// Checks `value` against its derived rules. The first violation becomes the client message,
/// rendered as `field: reason`.
pub fn validate<T>(value: &T) -> Result<(), Report<KernelError>>
where
    T: Validate,
    T::Context: Default,
{
    value.validate().map_err(|report| {
        let message = report
            .iter()
            .next()
            .map(|(path, error)| {
                let path = camel_case(&path.to_string());
                if path.is_empty() {
                    error.to_string()
                } else {
                    format!("{path}: {error}")
                }
            })
            .unwrap_or_else(|| report.to_string());
        KernelError::Validation.with_message(message)
    })
}

/// Payload fields travel as camelCase, so messages name them that way.
fn camel_case(path: &str) -> String {
    let mut renamed = String::with_capacity(path.len());
    let mut upper = false;
    for c in path.chars() {
        match c {
            '_' => upper = true,
            c if upper => {
                renamed.extend(c.to_uppercase());
                upper = false;
            }
            c => renamed.push(c),
        }
    }
    renamed
}

/// Custom rule for identifiers sent in request bodies.
pub fn uuid(value: &str, _: &()) -> garde::Result {
    Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|_| garde::Error::new("not a valid id"))
}
