use std::error::Error;
use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read, Write};

use clap::{ArgAction, Parser};
use serde::Serialize;
use sitecore_layout::fields::TextField;
use sitecore_layout::{
    DatasourceMode, FieldSet, LayoutResponse, ParseOptions, Placeholder, PlaceholderFeature,
    PlaceholderMap,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "layout-dump", version, about = "Outline a layout-service response")]
struct Args {
    /// Input file path. Omit or use '-' to read from stdin.
    input: Option<String>,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file")]
    output: Option<String>,

    /// Treat the input as a bare placeholder array instead of a full response.
    #[arg(long)]
    placeholder: bool,

    /// List every field with its text rendering.
    #[arg(long)]
    fields: bool,

    /// Print the decoded tree as JSON instead of an outline.
    #[arg(long)]
    json: bool,

    /// Fill missing datasources the way a disconnected layout service does.
    #[arg(long)]
    disconnected: bool,

    /// Accept trailing content after the document.
    #[arg(long = "no-strict", action = ArgAction::SetFalse, default_value_t = true)]
    strict: bool,

    /// Log parser decisions to stderr.
    #[arg(short, long)]
    verbose: bool,
}

enum Decoded {
    Response(LayoutResponse),
    Placeholder(Placeholder),
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);
    if let Err(err) = run(&args) {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let input = read_input(args.input.as_deref())?;
    let mode = if args.disconnected {
        DatasourceMode::Disconnected
    } else {
        DatasourceMode::Connected
    };
    let options = ParseOptions::new()
        .with_strict(args.strict)
        .with_datasource_mode(mode);

    let decoded = if args.placeholder {
        Decoded::Placeholder(sitecore_layout::placeholder_from_str_with_options(
            &input, &options,
        )?)
    } else {
        Decoded::Response(sitecore_layout::from_str_with_options(&input, &options)?)
    };
    debug!(bytes = input.len(), "decoded input");

    let rendered = if args.json {
        match &decoded {
            Decoded::Response(response) => to_json(response)?,
            Decoded::Placeholder(placeholder) => to_json(placeholder)?,
        }
    } else {
        let mut out = Outline::new(args.fields);
        match &decoded {
            Decoded::Response(response) => out.response(response)?,
            Decoded::Placeholder(placeholder) => out.placeholder("placeholder", placeholder, 0)?,
        }
        out.finish()
    };
    write_output(args.output.as_deref(), rendered.as_bytes())
}

fn read_input(input: Option<&str>) -> Result<String, Box<dyn Error>> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(fs::read_to_string(path)?),
    }
}

fn write_output(path: Option<&str>, data: &[u8]) -> Result<(), Box<dyn Error>> {
    match path {
        Some(path) if path != "-" => fs::write(path, data)?,
        _ => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(data)?;
        }
    }
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, Box<dyn Error>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"  ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(String::from_utf8(buf)?)
}

struct Outline {
    show_fields: bool,
    out: String,
}

impl Outline {
    fn new(show_fields: bool) -> Self {
        Self {
            show_fields,
            out: String::new(),
        }
    }

    fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, depth: usize, text: &str) -> std::fmt::Result {
        writeln!(self.out, "{:width$}{text}", "", width = depth * 2)
    }

    fn response(&mut self, response: &LayoutResponse) -> std::fmt::Result {
        let context = &response.context;
        let site = context.site.as_ref().map_or("", |site| site.name.as_str());
        self.line(
            0,
            &format!(
                "context language={} site={} editing={}",
                context.language,
                site,
                context.is_editing()
            ),
        )?;
        let Some(route) = &response.route else {
            return self.line(0, "route (none)");
        };
        let version = route
            .item_version
            .map(|version| format!(" version={version}"))
            .unwrap_or_default();
        self.line(0, &format!("route {} item={}{version}", route.name, route.item_id))?;
        self.fields(&route.fields, 1)?;
        self.placeholders(&route.placeholders, 1)
    }

    fn placeholders(&mut self, placeholders: &PlaceholderMap, depth: usize) -> std::fmt::Result {
        let mut keys: Vec<_> = placeholders.keys().collect();
        keys.sort();
        for key in keys {
            self.placeholder(key, &placeholders[key], depth)?;
        }
        Ok(())
    }

    fn placeholder(&mut self, key: &str, placeholder: &Placeholder, depth: usize) -> std::fmt::Result {
        self.line(depth, &format!("[{key}]"))?;
        for feature in placeholder {
            match feature {
                PlaceholderFeature::Component(component) => {
                    let mut text = format!("component {} id={}", component.name, component.id);
                    if !component.datasource.is_empty() {
                        write!(text, " datasource={}", component.datasource)?;
                    }
                    let mut params: Vec<_> = component.parameters.iter().collect();
                    params.sort();
                    for (name, value) in params {
                        write!(text, " {name}={value}")?;
                    }
                    self.line(depth + 1, &text)?;
                    self.fields(&component.fields, depth + 2)?;
                    self.placeholders(&component.placeholders, depth + 2)?;
                }
                PlaceholderFeature::Chrome(chrome) => {
                    let kind = chrome.chrome_kind().unwrap_or("-");
                    self.line(
                        depth + 1,
                        &format!("chrome {} ({kind}) {:?}", chrome.name, chrome.content),
                    )?;
                }
            }
        }
        Ok(())
    }

    fn fields(&mut self, fields: &FieldSet, depth: usize) -> std::fmt::Result {
        if !self.show_fields {
            return Ok(());
        }
        let mut entries: Vec<_> = fields.iter().collect();
        entries.sort_by(|left, right| left.0.cmp(right.0));
        for (name, value) in entries {
            let text = match value.reify::<TextField>() {
                Some(text) => text.value,
                None => value.inner().to_string(),
            };
            self.line(depth, &format!("{name}: {text}"))?;
        }
        Ok(())
    }
}
