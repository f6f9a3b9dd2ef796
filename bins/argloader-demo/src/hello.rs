use argloader::{ArgLoader, ArgRecord, ArgsConfig, LoadError, RawArgs, WireType};

/// A queryable field: declared arguments plus the function producing its value.
pub struct FieldDef {
    pub name: &'static str,
    pub wire_type: WireType,
    pub description: &'static str,
    pub args: ArgsConfig,
    pub resolve: fn(&ArgLoader, &RawArgs) -> Result<String, LoadError>,
}

#[derive(ArgRecord, Debug, Default)]
pub struct HelloArgs {
    #[arg(name = "name", required = "true", desc = "Your name")]
    pub name: String,

    #[arg(name = "greeting", desc = "How to say hello")]
    pub greeting: String,
}

/// All fields served by the demo.
pub fn fields(loader: &ArgLoader) -> Vec<FieldDef> {
    vec![FieldDef {
        name: "hello",
        wire_type: WireType::String,
        description: "Greets someone",
        args: loader.args_config::<HelloArgs>(),
        resolve: resolve_hello,
    }]
}

fn resolve_hello(loader: &ArgLoader, args: &RawArgs) -> Result<String, LoadError> {
    let mut hello: HelloArgs = loader.parse_args(args)?;
    if hello.greeting.is_empty() {
        hello.greeting = "Hello".to_string();
    }
    Ok(format!("{} {}", hello.greeting, hello.name))
}
