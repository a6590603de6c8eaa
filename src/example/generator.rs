use crate::model::ParamType;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

const FIRST_NAMES: [&str; 8] = [
    "Jessica", "Marcus", "Elena", "Tobias", "Priya", "Daniel", "Amara", "Louis",
];
const LAST_NAMES: [&str; 8] = [
    "Keller", "Okafor", "Tanaka", "Alvarez", "Nguyen", "Weber", "Sorensen", "Marsh",
];
const DOMAINS: [&str; 3] = ["example.com", "example.net", "example.org"];
const WORDS: [&str; 12] = [
    "aut",
    "quam",
    "eos",
    "dolores",
    "voluptatem",
    "consequatur",
    "necessitatibus",
    "enim",
    "velit",
    "sunt",
    "rerum",
    "molestiae",
];

const DEFAULT_MIN: i64 = 1;
const DEFAULT_MAX: i64 = 20;

/// What the generator needs to know about one parameter.
#[derive(Debug, Clone, Default)]
pub struct ParameterSpec<'a> {
    /// Parameter name; its substrings act as the semantic hint for strings.
    pub name: &'a str,
    pub ty: ParamType,
    pub min: Option<i64>,
    pub max: Option<i64>,
    /// Declared choices for enum-like parameters.
    pub choices: &'a [String],
    /// Pick a pseudo-random choice instead of the first declared one.
    pub randomize_choice: bool,
}

impl<'a> ParameterSpec<'a> {
    pub fn new(name: &'a str, ty: ParamType) -> Self {
        Self {
            name,
            ty,
            ..Self::default()
        }
    }
}

/// Stateful example-value generator over a single seeded stream.
///
/// Exclusively owned by the pipeline driver; strategies receive it `&mut`
/// so every generation call advances the one shared stream in execution
/// order.
#[derive(Debug)]
pub struct ExampleGenerator {
    rng: StdRng,
}

impl ExampleGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Produce an example value for one parameter.
    pub fn generate(&mut self, spec: &ParameterSpec<'_>) -> Value {
        if !spec.choices.is_empty() {
            let index = if spec.randomize_choice {
                self.rng.gen_range(0..spec.choices.len())
            } else {
                0
            };
            return Value::String(spec.choices[index].clone());
        }
        match spec.ty {
            ParamType::String => Value::String(self.fake_string(spec.name)),
            ParamType::Integer => json!(self.integer(spec.min, spec.max)),
            ParamType::Number => json!(self.number(spec.min, spec.max)),
            ParamType::Boolean => json!(self.rng.gen_bool(0.5)),
            ParamType::Array => json!([self.pick(&WORDS)]),
            ParamType::Object => json!({}),
        }
    }

    fn integer(&mut self, min: Option<i64>, max: Option<i64>) -> i64 {
        let min = min.unwrap_or(DEFAULT_MIN);
        let max = max.unwrap_or(DEFAULT_MAX).max(min);
        self.rng.gen_range(min..=max)
    }

    /// Bounded float with two decimals so the JSON spelling stays short and
    /// reproducible.
    fn number(&mut self, min: Option<i64>, max: Option<i64>) -> f64 {
        let min = min.unwrap_or(DEFAULT_MIN);
        let max = max.unwrap_or(DEFAULT_MAX).max(min);
        let cents = self.rng.gen_range(min * 100..=max * 100);
        cents as f64 / 100.0
    }

    /// Realistic fake text keyed by a semantic hint in the parameter name.
    fn fake_string(&mut self, name: &str) -> String {
        let hint = name.to_ascii_lowercase();
        if hint.contains("email") {
            let user = self.pick(&FIRST_NAMES).to_ascii_lowercase();
            let number = self.rng.gen_range(10..100);
            let domain = self.pick(&DOMAINS);
            format!("{user}{number}@{domain}")
        } else if hint.contains("first_name") {
            self.pick(&FIRST_NAMES).to_string()
        } else if hint.contains("last_name") {
            self.pick(&LAST_NAMES).to_string()
        } else if hint.contains("name") || hint.contains("user") {
            format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES))
        } else if hint.contains("url") || hint.contains("link") {
            format!("https://{}/{}", self.pick(&DOMAINS), self.pick(&WORDS))
        } else if hint.contains("date") || hint.ends_with("_at") {
            format!(
                "2024-{:02}-{:02}",
                self.rng.gen_range(1..=12),
                self.rng.gen_range(1..=28)
            )
        } else {
            let count = self.rng.gen_range(2..=3);
            (0..count)
                .map(|_| self.pick(&WORDS))
                .collect::<Vec<_>>()
                .join(" ")
        }
    }

    fn pick<'v>(&mut self, pool: &[&'v str]) -> &'v str {
        pool[self.rng.gen_range(0..pool.len())]
    }
}
