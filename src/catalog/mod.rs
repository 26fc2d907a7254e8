//! The exercise catalog.
//!
//! A compile-time table of practice exercises, grouped by category. The
//! catalog is pure metadata plus starter sources; it knows nothing about
//! the pipeline, and the frontend treats it as read-only.
//!
//! Every exercise resolves to a starter source: a handful ship a real
//! worked starter (see [`starters`]), the rest fall back to a generated
//! placeholder so picking any entry always yields something runnable.

pub mod starters;

/// Broad grouping used by the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Core,
    State,
    Performance,
    Ui,
    Data,
    Advanced,
    RealWorld,
    Architecture,
    Bonus,
}

impl Category {
    /// All categories in sidebar display order
    pub fn all() -> &'static [Category] {
        &[
            Self::Core,
            Self::State,
            Self::Performance,
            Self::Ui,
            Self::Data,
            Self::Advanced,
            Self::RealWorld,
            Self::Architecture,
            Self::Bonus,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Core => "Core",
            Self::State => "State & Helpers",
            Self::Performance => "Performance",
            Self::Ui => "UI Patterns",
            Self::Data => "Data Display",
            Self::Advanced => "Advanced",
            Self::RealWorld => "Real World",
            Self::Architecture => "Architecture",
            Self::Bonus => "Bonus",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

/// One catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exercise {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub difficulty: Difficulty,
    /// Keep the log panel visible even when the run renders
    pub always_show_logs: bool,
}

impl Exercise {
    /// The starter source for this exercise; a generated placeholder when
    /// no worked starter exists.
    pub fn starter_or_template(&self) -> String {
        match starters::starter_for(self.id) {
            Some(source) => source.to_string(),
            None => starters::placeholder(self),
        }
    }
}

const fn exercise(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    category: Category,
    difficulty: Difficulty,
) -> Exercise {
    Exercise {
        id,
        title,
        description,
        category,
        difficulty,
        always_show_logs: false,
    }
}

use Category::*;
use Difficulty::*;

/// The free-form scratch exercise, shown outside the catalog proper
pub const SANDBOX: Exercise = Exercise {
    id: "sandbox",
    title: "Sandbox",
    description: "A free-form scratchpad with an always-visible log panel",
    category: Bonus,
    difficulty: Easy,
    always_show_logs: true,
};

#[rustfmt::skip]
const EXERCISES: &[Exercise] = &[
    // Core
    exercise("counter", "Counter with increment/decrement", "Build a counter component with increment, decrement, and reset controls", Core, Easy),
    exercise("todo-app", "Todo App (CRUD)", "Create a todo list with create, read, update, and delete operations", Core, Medium),
    exercise("debounced-search", "Debounced search input", "Implement a search input that filters results after a typing pause", Core, Medium),
    exercise("stale-closure", "Stale Closure Example", "Demonstrate how a captured value goes stale and how to fix it", Core, Easy),
    exercise("contact-form", "Contact Form", "Create a contact form with name, email, and message fields", Core, Medium),
    exercise("modal", "Modal component", "Build a reusable modal with an overlay and close control", Core, Medium),
    exercise("tabs", "Tabs component", "Create a tabs component with an active-tab indicator", Core, Medium),
    exercise("accordion", "Accordion", "Build an accordion with expandable and collapsible sections", Core, Easy),
    exercise("pagination", "Pagination", "Implement pagination with page numbers and navigation", Core, Medium),
    exercise("infinite-scroll", "Infinite scroll", "Create an infinitely scrolling list with loading states", Core, Hard),
    exercise("dropdown-keyboard", "Dropdown with keyboard navigation", "Build a dropdown with arrow-key navigation and selection", Core, Hard),
    // State & helpers
    exercise("debounce-value", "Debounced value helper", "Write a helper that settles a rapidly changing value", State, Medium),
    exercise("throttle-value", "Throttled value helper", "Write a helper that rate-limits a changing value", State, Medium),
    exercise("previous-value", "Previous-value tracker", "Track the previous value of a changing input", State, Easy),
    exercise("outside-click", "Outside-click detection", "Detect interactions outside a given element", State, Medium),
    exercise("form-validation", "Form validation helper", "Build a reusable form validation helper", State, Hard),
    // Performance
    exercise("virtualized-list", "Virtualized list", "Render only the visible window of a large dataset", Performance, Hard),
    exercise("memoized-list", "Memoized list rendering", "Avoid re-rendering unchanged list rows", Performance, Medium),
    exercise("optimized-search-filter", "Optimized search filter", "Create a search filter that caches intermediate results", Performance, Medium),
    exercise("image-lazy-loading", "Image lazy loading", "Defer offscreen images until they come into view", Performance, Medium),
    exercise("window-resize-optimization", "Resize listener optimization", "Throttle work driven by window resizes", Performance, Medium),
    // UI patterns
    exercise("toast-notifications", "Toast notification system", "Build a toast system with queue management", Ui, Hard),
    exercise("theme-switcher", "Theme switcher", "Create a theme switcher with persistence", Ui, Easy),
    exercise("skeleton-loader", "Skeleton loader", "Build skeleton loading components", Ui, Easy),
    exercise("stepper", "Stepper component", "Create a multi-step stepper component", Ui, Medium),
    exercise("carousel", "Carousel / slider", "Build a carousel with autoplay and navigation", Ui, Hard),
    // Data display
    exercise("table-sorting", "Table with sorting", "Create a table with sortable columns", Data, Medium),
    exercise("table-filtering", "Table with filtering", "Build a table with column filtering", Data, Medium),
    exercise("table-pagination", "Table with pagination", "Implement a table with pagination controls", Data, Medium),
    exercise("searchable-dropdown", "Searchable dropdown", "Create a dropdown with search built in", Data, Medium),
    exercise("multi-select-dropdown", "Multi-select dropdown", "Build a multi-select dropdown component", Data, Hard),
    // Advanced
    exercise("file-upload", "File upload with preview", "Create a file upload component with image preview", Advanced, Hard),
    exercise("drag-drop-list", "Drag and drop list", "Implement a draggable, sortable list", Advanced, Hard),
    exercise("kanban-board", "Kanban board", "Build a Kanban board with movable cards", Advanced, Hard),
    exercise("chat-ui", "Chat UI", "Create a chat interface with message bubbles", Advanced, Medium),
    exercise("autocomplete", "Autocomplete input", "Build an autocomplete input with suggestions", Advanced, Hard),
    // Real world
    exercise("otp-input", "OTP input", "Create a one-time-code input with auto-focus", RealWorld, Medium),
    exercise("countdown-timer", "Countdown timer", "Build a countdown timer component", RealWorld, Medium),
    exercise("rating", "Rating component", "Create a star rating component", RealWorld, Easy),
    exercise("breadcrumb", "Breadcrumb navigation", "Implement breadcrumb navigation", RealWorld, Easy),
    exercise("password-strength", "Password strength checker", "Build a password strength indicator", RealWorld, Medium),
    // Architecture
    exercise("feature-flags", "Feature flag system", "Create a feature flag system with scoped defaults", Architecture, Hard),
    exercise("role-based-ui", "Role-based UI rendering", "Render different views per user role", Architecture, Medium),
    exercise("error-boundary", "Error boundary implementation", "Contain a failing subtree without losing the page", Architecture, Medium),
    exercise("retry-api", "Retry mechanism (mock)", "Build a retry mechanism around a flaky call", Architecture, Hard),
    exercise("event-bus", "Global event bus", "Create an event bus for cross-component messages", Architecture, Hard),
    // Bonus
    exercise("form-builder", "Form builder", "Build a dynamic form builder", Bonus, Hard),
    exercise("json-viewer", "JSON viewer", "Create a data viewer with expand/collapse", Bonus, Medium),
    exercise("code-editor-wrapper", "Code editor wrapper", "Build a wrapper around an embedded editor", Bonus, Hard),
    exercise("notification-center", "Notification center", "Create a notification center with live updates", Bonus, Hard),
    exercise("dashboard-layout", "Dashboard layout system", "Build a responsive dashboard layout", Bonus, Hard),
];

/// Read-only access to the exercise table
pub struct Catalog;

impl Catalog {
    pub fn all() -> &'static [Exercise] {
        EXERCISES
    }

    /// Exercises in one category, in table order
    pub fn in_category(category: Category) -> impl Iterator<Item = &'static Exercise> {
        EXERCISES.iter().filter(move |ex| ex.category == category)
    }

    /// Look up an exercise by id; resolves the sandbox too
    pub fn get(id: &str) -> Option<&'static Exercise> {
        if id == SANDBOX.id {
            return Some(&SANDBOX);
        }
        EXERCISES.iter().find(|ex| ex.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_ids_are_unique() {
        let mut seen = BTreeSet::new();
        for ex in Catalog::all() {
            assert!(seen.insert(ex.id), "duplicate exercise id: {}", ex.id);
        }
        assert!(!seen.contains(SANDBOX.id));
    }

    #[test]
    fn test_lookup() {
        let ex = Catalog::get("counter").unwrap();
        assert_eq!(ex.title, "Counter with increment/decrement");
        assert_eq!(ex.category, Category::Core);
        assert!(!ex.always_show_logs);

        assert!(Catalog::get("sandbox").unwrap().always_show_logs);
        assert!(Catalog::get("nope").is_none());
    }

    #[test]
    fn test_every_category_is_populated() {
        for category in Category::all() {
            assert!(
                Catalog::in_category(*category).next().is_some(),
                "empty category: {}",
                category.label()
            );
        }
    }

    #[test]
    fn test_every_exercise_has_a_source() {
        for ex in Catalog::all() {
            assert!(!ex.starter_or_template().is_empty(), "{}", ex.id);
        }
        assert!(!SANDBOX.starter_or_template().is_empty());
    }
}
