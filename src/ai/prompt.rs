//! Reusable prompts using Handlebars for templating. Templates are
//! rendered without HTML escaping since the output goes to the model,
//! not a browser.

use std::fmt;

use anyhow::Result;
use handlebars::Handlebars;
use serde::Serialize;

#[derive(Debug)]
pub enum Prompt {
    TravelPlanner,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

const TRAVEL_PLANNER_PROMPT: &str = "You are a friendly {{name}}, specializing in cost-conscious travel advice. \
You help users find {{#each specialties}}{{#if @last}}and {{/if}}{{this}}{{#unless @last}}, {{/unless}}{{/each}} in their chosen destination. \
If a user's query is unrelated to {{topic}}, respond by stating that you do not know.";

/// Who the assistant is and what it's willing to talk about.
#[derive(Debug, Serialize)]
pub struct Persona<'a> {
    pub name: &'a str,
    pub topic: &'a str,
    pub specialties: &'a [&'a str],
}

pub const BUDGET_TRAVEL_PLANNER: Persona<'static> = Persona {
    name: "Budget Travel Planner",
    topic: "budget travel",
    specialties: &[
        "cheap flights",
        "budget-friendly accommodations",
        "affordable itineraries",
        "low-cost activities",
    ],
};

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry.register_escape_fn(handlebars::no_escape);
    registry
        .register_template_string(&Prompt::TravelPlanner.to_string(), TRAVEL_PLANNER_PROMPT)
        .expect("Failed to register template");
    registry
}

/// Renders the system message that seeds every new transcript.
pub fn system_prompt(persona: &Persona) -> Result<String> {
    let prompt = templates().render(&Prompt::TravelPlanner.to_string(), persona)?;
    Ok(prompt)
}

/// The default persona's system message, or `custom` when one is
/// configured.
pub fn system_message(custom: Option<&str>) -> Result<String> {
    match custom {
        Some(msg) => Ok(msg.to_string()),
        None => system_prompt(&BUDGET_TRAVEL_PLANNER),
    }
}
