use argloader::value::raw_args_from;
use argloader::{ArgLoader, ArgRecord, ConvertError, ErrorKind, LoadError, RawArgs, WireType};
use serde_json::{json, Value};

#[derive(ArgRecord, Debug, Default, PartialEq)]
struct HelloArgs {
    #[arg(name = "name", required = "true", desc = "Your name")]
    name: String,

    #[arg(name = "greeting", desc = "How to say hello")]
    greeting: String,
}

#[derive(ArgRecord, Debug, Default, PartialEq)]
struct SearchArgs {
    #[arg(required)]
    query: String,

    #[arg(name = "max", required = false, description = "Maximum number of hits")]
    limit: i64,

    #[arg(name = "fuzzy", required = "F")]
    fuzzy: bool,

    #[arg(name = "min_score")]
    min_score: f64,

    // Internal bookkeeping, never an argument.
    hits: u32,
}

#[derive(Debug, Clone, PartialEq)]
struct Color(u8, u8, u8);

fn load_color(raw: &Value) -> Result<Color, String> {
    let text = raw.as_str().ok_or_else(|| format!("{raw} is not a color"))?;
    let hex = text
        .strip_prefix('#')
        .filter(|h| h.len() == 6)
        .ok_or_else(|| format!("{text} is not a #rrggbb color"))?;
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
    Ok(Color(channel(0)?, channel(2)?, channel(4)?))
}

#[derive(ArgRecord, Debug, Default, PartialEq)]
struct PaintArgs {
    #[arg(name = "color", required, desc = "Fill color")]
    color: Option<Color>,
}

fn args(value: Value) -> RawArgs {
    raw_args_from(value).unwrap()
}

#[test]
fn test_hello_loads_both_arguments() {
    let loader = ArgLoader::new();
    let mut hello = HelloArgs::default();
    loader
        .load_args(&args(json!({"name": "Joe", "greeting": "Goodbye"})), &mut hello)
        .unwrap();
    assert_eq!(
        hello,
        HelloArgs {
            name: "Joe".into(),
            greeting: "Goodbye".into(),
        }
    );
}

#[test]
fn test_hello_missing_name() {
    let loader = ArgLoader::new();
    let mut hello = HelloArgs::default();
    let err = loader
        .load_args(&args(json!({"greeting": "Hi"})), &mut hello)
        .unwrap_err();
    assert_eq!(err.to_string(), "name is required");
    assert_eq!(err.kind(), ErrorKind::Populate);
    assert_eq!(hello, HelloArgs::default());
}

#[test]
fn test_hello_wrong_type() {
    let loader = ArgLoader::new();
    let err = loader
        .parse_args::<HelloArgs>(&args(json!({"name": 42})))
        .unwrap_err();
    assert_eq!(
        err,
        LoadError::Convert {
            field: "name",
            source: ConvertError::Rejected("42 is not a string".into()),
        }
    );
}

#[test]
fn test_hello_optional_greeting_absent() {
    let loader = ArgLoader::new();
    let hello: HelloArgs = loader.parse_args(&args(json!({"name": "Joe"}))).unwrap();
    assert_eq!(hello.name, "Joe");
    assert_eq!(hello.greeting, "");
}

#[test]
fn test_hello_schema() {
    let loader = ArgLoader::new();
    let config = loader.safe_args_config::<HelloArgs>().unwrap();

    assert_eq!(config.len(), 2);
    assert_eq!(config["name"].wire_type, Some(WireType::String));
    assert_eq!(config["name"].description, "Your name");
    assert_eq!(config["greeting"].wire_type, Some(WireType::String));
    assert_eq!(config["greeting"].description, "How to say hello");
}

#[test]
fn test_derive_descriptor_table() {
    let fields = SearchArgs::arg_fields();
    let args: Vec<_> = fields.iter().map(|f| f.arg()).collect();
    assert_eq!(args, ["query", "max", "fuzzy", "min_score"]);

    assert_eq!(fields[0].required_tag(), Some("true"));
    assert_eq!(fields[1].required_tag(), Some("false"));
    assert_eq!(fields[1].field(), "limit");
    assert_eq!(fields[1].description(), "Maximum number of hits");
    assert_eq!(fields[2].is_required(), Ok(false));
    assert_eq!(fields[3].required_tag(), None);
}

#[test]
fn test_unannotated_field_skipped() {
    let loader = ArgLoader::new();
    let config = loader.args_config::<SearchArgs>();
    assert!(!config.contains_key("hits"));

    let mut search = SearchArgs {
        hits: 7,
        ..SearchArgs::default()
    };
    loader
        .load_args(&args(json!({"query": "q", "hits": 100})), &mut search)
        .unwrap();
    assert_eq!(search.hits, 7);
}

#[test]
fn test_all_builtin_scalars() {
    let loader = ArgLoader::new();
    let search: SearchArgs = loader
        .parse_args(&args(json!({
            "query": "rust",
            "max": 20,
            "fuzzy": true,
            "min_score": 0.75,
        })))
        .unwrap();
    assert_eq!(
        search,
        SearchArgs {
            query: "rust".into(),
            limit: 20,
            fuzzy: true,
            min_score: 0.75,
            hits: 0,
        }
    );
}

#[test]
fn test_no_numeric_coercion() {
    let loader = ArgLoader::new();
    let err = loader
        .parse_args::<SearchArgs>(&args(json!({"query": "q", "min_score": 1})))
        .unwrap_err();
    assert_eq!(err.to_string(), "cannot populate min_score: 1 is not a float");

    let err = loader
        .parse_args::<SearchArgs>(&args(json!({"query": "q", "max": 1.0})))
        .unwrap_err();
    assert_eq!(err.to_string(), "cannot populate limit: 1.0 is not an int");
}

#[test]
fn test_custom_converter_extends_registry() {
    let mut loader = ArgLoader::new();
    loader
        .register(
            |raw: &Value| load_color(raw).map(Some),
            WireType::named("Color"),
        )
        .unwrap();

    let paint: PaintArgs = loader.parse_args(&args(json!({"color": "#ff8000"}))).unwrap();
    assert_eq!(paint.color, Some(Color(255, 128, 0)));

    let config = loader.args_config::<PaintArgs>();
    assert_eq!(config["color"].wire_type, Some(WireType::named("Color")));

    let err = loader
        .parse_args::<PaintArgs>(&args(json!({"color": "orange"})))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot populate color: orange is not a #rrggbb color"
    );
}

#[test]
fn test_custom_type_without_converter() {
    let loader = ArgLoader::new();
    let err = loader
        .parse_args::<PaintArgs>(&args(json!({"color": "#000000"})))
        .unwrap_err();
    assert!(matches!(err, LoadError::NoConverter { .. }));
    assert!(err.to_string().contains("Color"));

    let config = loader.args_config::<PaintArgs>();
    assert_eq!(config["color"].wire_type, None);
}

#[test]
fn test_panicking_custom_converter() {
    let mut loader = ArgLoader::new();
    loader
        .register(
            |raw: &Value| -> Result<Option<Color>, String> {
                let text = raw.as_str().unwrap();
                Ok(Some(Color(text.as_bytes()[10], 0, 0)))
            },
            WireType::named("Color"),
        )
        .unwrap();

    let err = loader
        .parse_args::<PaintArgs>(&args(json!({"color": "#fff"})))
        .unwrap_err();
    assert!(matches!(
        err,
        LoadError::Convert {
            field: "color",
            source: ConvertError::Panicked { .. },
        }
    ));
    assert!(err.to_string().contains("index out of bounds"));
}

#[test]
fn test_loader_shared_across_threads() {
    let loader = ArgLoader::new();
    std::thread::scope(|s| {
        for i in 0..4 {
            let loader = &loader;
            s.spawn(move || {
                let name = format!("user{i}");
                let hello: HelloArgs = loader.parse_args(&args(json!({"name": &name}))).unwrap();
                assert_eq!(hello.name, name);
            });
        }
    });
}
