// SPDX-License-Identifier: MIT

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use exp_rs::exp::{parse_with, ExpError, Map, ParseOptions, Params, QueryParams};
use exp_rs::rules::{RuleLoader, RuleSet};
use std::borrow::Cow;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a single expression
    Eval {
        /// The expression to evaluate
        #[arg(short, long)]
        expr: String,

        /// A parameter as key=value, may be repeated
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Parameters as a URL query string
        #[arg(short, long)]
        query: Option<String>,

        /// Stop at unknown characters instead of failing
        #[arg(long)]
        lenient: bool,
    },
    /// Evaluate a rule set from a file
    Check {
        /// Path to the rule set file
        #[arg(short, long)]
        file: String,

        /// A parameter as key=value, may be repeated
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Parameters as a URL query string
        #[arg(short, long)]
        query: Option<String>,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {:?}", raw))
}

/// Explicit `--param` values, falling back to the query string
struct Inputs {
    explicit: Map,
    query: QueryParams,
}

impl Inputs {
    fn new(params: Vec<(String, String)>, query: Option<&str>) -> Self {
        Self {
            explicit: params.into_iter().collect(),
            query: query.map(QueryParams::parse).unwrap_or_default(),
        }
    }
}

impl Params for Inputs {
    fn get(&self, key: &str) -> Cow<'_, str> {
        match self.explicit.get(key) {
            Some(value) => Cow::Borrowed(value.as_str()),
            None => Params::get(&self.query, key),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Eval {
            expr,
            params,
            query,
            lenient,
        } => {
            let options = ParseOptions::default().with_lenient(lenient);
            let inputs = Inputs::new(params, query.as_deref());

            let expression = parse_with(&expr, &options).map_err(|e| report(&expr, e))?;
            println!("Expression: {}", expression);
            println!("Result: {}", expression.eval(&inputs));
        }
        Commands::Check {
            file,
            params,
            query,
        } => {
            let def = RuleLoader::new().load(&file)?;
            let rule_set = RuleSet::compile(&def)?;
            log::info!(
                "Loaded rule set '{}' with {} rules",
                rule_set.name(),
                rule_set.rules().len()
            );

            let inputs = Inputs::new(params, query.as_deref());
            let matching = rule_set.matching(&inputs);
            if matching.is_empty() {
                println!("No rules matched");
            }
            for rule in matching {
                println!("Matched: {} {}", rule.name, rule.expression);
            }
            match rule_set.route(&inputs) {
                Some(name) => println!("Route: {}", name),
                None => println!("Route: none"),
            }
        }
    }

    Ok(())
}

/// Point at the failing column before handing the error back
fn report(source: &str, err: ExpError) -> ExpError {
    if let Some((line, col)) = err.position() {
        if let Some(text) = source.lines().nth(line.saturating_sub(1)) {
            eprintln!("{}", text);
            eprintln!("{}^", " ".repeat(col.saturating_sub(1)));
        }
    }
    err
}
