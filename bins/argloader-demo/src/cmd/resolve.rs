use argloader::{ArgLoader, RawArgs};
use serde_json::json;

use crate::config::{RequestConfig, ResolveArgs};
use crate::error::DemoError;
use crate::hello::{self, FieldDef};

pub fn run(loader: &ArgLoader, args: ResolveArgs) -> Result<(), DemoError> {
    let (field_name, raw) = read_request(&args)?;
    let value = resolve(loader, &field_name, &raw)?;
    let out = json!({ "data": { field_name: value } });
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}

/// Field name and raw arguments, from a request file or inline JSON.
fn read_request(args: &ResolveArgs) -> Result<(String, RawArgs), DemoError> {
    let (field, raw) = match (&args.request, &args.args) {
        (Some(path), _) => {
            let request = RequestConfig::load(path)?;
            tracing::info!(request = %path, "loaded request");
            let raw = request.raw_args()?;
            (request.field, raw)
        }
        (None, Some(inline)) => {
            let value: serde_json::Value =
                serde_json::from_str(inline).map_err(|e| DemoError::Config {
                    context: "args",
                    detail: e.to_string(),
                })?;
            ("hello".to_string(), argloader::value::raw_args_from(value)?)
        }
        (None, None) => return Err(DemoError::NoRequest),
    };
    Ok((args.field.clone().unwrap_or(field), raw))
}

/// Look up `field_name`, reject undeclared arguments, run its resolver.
pub fn resolve(loader: &ArgLoader, field_name: &str, raw: &RawArgs) -> Result<String, DemoError> {
    let fields = hello::fields(loader);
    let field: &FieldDef = fields
        .iter()
        .find(|f| f.name == field_name)
        .ok_or_else(|| DemoError::FieldNotFound(field_name.to_string()))?;

    if let Some(unknown) = raw.keys().find(|k| !field.args.contains_key(k.as_str())) {
        return Err(DemoError::Config {
            context: "args",
            detail: format!("unknown argument '{unknown}' for field '{field_name}'"),
        });
    }

    tracing::info!(field = field_name, args = raw.len(), "resolving field");
    let value = (field.resolve)(loader, raw)
        .map_err(|e| e.with_context(format!("field '{field_name}'")))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argloader::value::raw_args_from;

    fn raw(value: serde_json::Value) -> RawArgs {
        raw_args_from(value).unwrap()
    }

    #[test]
    fn test_resolve_hello() {
        let loader = ArgLoader::new();
        let value = resolve(&loader, "hello", &raw(json!({"name": "Joe", "greeting": "Goodbye"})))
            .unwrap();
        assert_eq!(value, "Goodbye Joe");
    }

    #[test]
    fn test_missing_name_reports_field() {
        let loader = ArgLoader::new();
        let err = resolve(&loader, "hello", &raw(json!({"greeting": "Hi"}))).unwrap_err();
        assert_eq!(err.to_string(), "field 'hello': name is required");
    }

    #[test]
    fn test_wrong_type() {
        let loader = ArgLoader::new();
        let err = resolve(&loader, "hello", &raw(json!({"name": 42}))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "field 'hello': cannot populate name: 42 is not a string"
        );
    }

    #[test]
    fn test_unknown_field_and_argument() {
        let loader = ArgLoader::new();
        assert!(matches!(
            resolve(&loader, "goodbye", &RawArgs::new()),
            Err(DemoError::FieldNotFound(_))
        ));
        assert!(matches!(
            resolve(&loader, "hello", &raw(json!({"name": "Joe", "mood": "happy"}))),
            Err(DemoError::Config { context: "args", .. })
        ));
    }

    #[test]
    fn test_inline_args_request() {
        let args = ResolveArgs {
            request: None,
            args: Some(r#"{"name": "Ann"}"#.to_string()),
            field: None,
        };
        let (field, raw) = read_request(&args).unwrap();
        assert_eq!(field, "hello");
        assert_eq!(raw.get("name"), Some(&json!("Ann")));
    }

    #[test]
    fn test_no_request() {
        let args = ResolveArgs {
            request: None,
            args: None,
            field: None,
        };
        assert!(matches!(read_request(&args), Err(DemoError::NoRequest)));
    }
}
