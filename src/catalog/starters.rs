//! Starter sources for the catalog.
//!
//! Starters are keyed by component name, derived from the exercise id by
//! pascal-casing its segments. A small override table carries the legacy
//! names that predate the convention (including their misspellings, which
//! are load-bearing for users with persisted state).
//!
//! Exercises without a worked starter get a generated placeholder so the
//! preview always has something to run.

use crate::catalog::Exercise;

/// Legacy component names that do not follow the pascal-case convention
const NAME_OVERRIDES: &[(&str, &str)] = &[
    ("stale-closure", "StaleClouserExample"),
    ("accordion", "Accordian"),
];

/// The component name an exercise id resolves to
pub fn component_name(id: &str) -> String {
    if let Some((_, name)) = NAME_OVERRIDES.iter().find(|(key, _)| *key == id) {
        return (*name).to_string();
    }
    id.split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// The worked starter for an exercise, if one exists
pub fn starter_for(id: &str) -> Option<&'static str> {
    let name = component_name(id);
    STARTERS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, source)| *source)
}

/// Generated starter for exercises without a worked one
pub fn placeholder(exercise: &Exercise) -> String {
    format!(
        "// {title}\n\
         // {description}\n\
         \n\
         import {{ el, text }} from \"ui\";\n\
         \n\
         export default fn practice() -> view {{\n\
         \x20   <div class=\"placeholder\">\n\
         \x20       <h2>{title}</h2>\n\
         \x20       <p>{description}</p>\n\
         \x20       <p>Replace this with your solution.</p>\n\
         \x20   </div>\n\
         }}\n",
        title = exercise.title,
        description = exercise.description,
    )
}

const STARTERS: &[(&str, &str)] = &[
    ("Counter", COUNTER),
    ("TodoApp", TODO_APP),
    ("DebouncedSearch", DEBOUNCED_SEARCH),
    ("StaleClouserExample", STALE_CLOSURE),
    ("Accordian", ACCORDION),
    ("ContactForm", CONTACT_FORM),
    ("Rating", RATING),
    ("Sandbox", SANDBOX),
];

const COUNTER: &str = r#"import { el, text } from "ui";

fn controls(count: int) -> view {
    <div class="controls">
        <button>-</button>
        <span class="count">{count}</span>
        <button>+</button>
    </div>
}

export default fn counter() -> view {
    let count: int = 0;
    <div class="card">
        <h2>Counter</h2>
        {controls(count)}
        <button class="reset">Reset</button>
    </div>
}
"#;

const TODO_APP: &str = r#"import { el, text } from "ui";

fn todo_item(label: string, done: bool) -> view {
    <li class={if done { "done" } else { "open" }}>{label}</li>
}

export default fn todo_app() -> view {
    let todos = [
        ["learn the dialect", true],
        ["render a list", true],
        ["wire up persistence", false],
    ];
    let items = todos.map(|t| todo_item(t[0], t[1]));
    <div class="card">
        <h2>Todos</h2>
        <ul>{items}</ul>
        <input placeholder="What needs doing?"/>
    </div>
}
"#;

const DEBOUNCED_SEARCH: &str = r#"import { el, text } from "ui";

fn result_row(name: string) -> view {
    <li>{name}</li>
}

export default fn search() -> view {
    let query: string = "r";
    let names = ["rust", "rhai", "ratatui", "serde"];
    let hits = names.filter(|n| n.contains(query));
    console.log("hits for", query, hits.len());
    <div class="card">
        <input placeholder="Search crates" value={query}/>
        <ul>{hits.map(|h| result_row(h))}</ul>
    </div>
}
"#;

const STALE_CLOSURE: &str = r#"// Closures capture variables shared, but a copied value is frozen at
// capture time. Watch the difference in the log panel.

let count = 0;
let snapshot = count;

let fresh = || count;
let stale = || snapshot;

count += 10;

console.log("fresh sees", fresh.call());
console.log("stale sees", stale.call());
"#;

const ACCORDION: &str = r#"import { el, text } from "ui";

fn section(title: string, body: string, open: bool) -> view {
    let children = if open {
        [<h3>{title}</h3>, <p>{body}</p>]
    } else {
        [<h3>{title}</h3>]
    };
    <section class={if open { "open" } else { "collapsed" }}>{children}</section>
}

export default fn accordion() -> view {
    <div class="accordion">
        {section("What is this?", "A practice exercise in expanding sections.", true)}
        {section("Why is this closed?", "Pass true to open it.", false)}
    </div>
}
"#;

const CONTACT_FORM: &str = r#"import { el, text } from "ui";

fn field(label: string, kind: string) -> view {
    <label class="field">
        {label}
        <input type={kind}/>
    </label>
}

export default fn contact_form() -> view {
    <form class="card">
        <h2>Contact</h2>
        {field("Name", "text")}
        {field("Email", "email")}
        <label class="field">
            Message
            <textarea rows="4"/>
        </label>
        <button type="submit">Send</button>
    </form>
}
"#;

const RATING: &str = r#"import { el, text } from "ui";

fn star(filled: bool) -> view {
    <span class={if filled { "star filled" } else { "star" }}>{if filled { "*" } else { "." }}</span>
}

export default fn rating() -> view {
    let score = 3;
    let stars = [1, 2, 3, 4, 5].map(|i| star(i <= score));
    <div class="rating">{stars}</div>
}
"#;

const SANDBOX: &str = r#"// Free-form scratchpad: the log panel stays visible here no matter
// what the run produces.

import { el, text } from "ui";

console.log("sandbox ready");

export default fn scratch() -> view {
    <div class="sandbox">
        <h2>Scratchpad</h2>
        <p>Edit freely; the preview follows every pause in typing.</p>
    </div>
}
"#;
