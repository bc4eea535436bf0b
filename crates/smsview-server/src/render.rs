//! HTML rendering.
//!
//! Templates are compiled once at startup into an immutable [`Templates`]
//! value that the router shares through its state.  Rendering produces a
//! complete `String`, so a failing template never leaves a half-written
//! response behind.

use minijinja::{context, Environment};
use serde::Serialize;
use smsview_shared::Thread;

pub const INDEX: &str = "index.html";

const INDEX_SOURCE: &str = include_str!("../templates/index.html");

pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Compile the built-in templates.
    pub fn new() -> Result<Self, minijinja::Error> {
        Self::from_sources([(INDEX, INDEX_SOURCE)])
    }

    /// Compile templates from `(name, source)` pairs.  `.html` names are
    /// auto-escaped.
    pub fn from_sources(
        sources: impl IntoIterator<Item = (&'static str, &'static str)>,
    ) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in sources {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    pub fn render(&self, name: &str, ctx: impl Serialize) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }

    pub fn render_index(&self, threads: &[Thread]) -> Result<String, minijinja::Error> {
        self.render(
            INDEX,
            context! {
                threads => threads,
                message_count => threads.iter().map(|t| t.messages.len()).sum::<usize>(),
            },
        )
    }
}
