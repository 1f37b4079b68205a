//! Minijinja-backed notification renderer with built-in templates.

use crate::notify::ports::{
    AssignmentView, CommentView, DigestView, LimitView, NotificationRenderer, ReminderView,
    RenderError, StatusChangeView,
};
use minijinja::Environment;
use serde::Serialize;

const ASSIGNMENT_TEMPLATE: &str = "\
You have been assigned a task.

#{{ task_id }} — {{ title }}
Priority: {{ priority }}
Author: {{ author }}
{%- if deadline %}
Due: {{ deadline }}
{%- endif %}";

const STATUS_CHANGE_TEMPLATE: &str = "\
Task status changed.

#{{ task_id }} — {{ title }}
New status: {{ status }}
Changed by: {{ changed_by }}";

const COMMENT_TEMPLATE: &str = "\
New comment.

Task #{{ task_id }} — {{ title }}
{{ commenter }}:
{{ text }}";

const REMINDER_TEMPLATE: &str = "\
{{ headline }}

Task #{{ task_id }} — {{ title }}
Due: {{ deadline }}

This task is {{ framing }}.";

const DIGEST_TEMPLATE: &str = "\
Good morning! Your agenda for today:

{% for section in sections -%}
{{ section.team_name }}
{% for task in section.tasks -%}
  - {{ task.title }} [{{ task.priority }}]{% if task.due_time %} (due {{ task.due_time }}){% endif %}
{% endfor %}
{% endfor -%}
{% if overdue -%}
Overdue:
{% for task in overdue -%}
  - {{ task.title }}
{% endfor -%}
{% endif -%}
Have a good day!";

const LIMIT_TEMPLATE: &str = "\
Limit reached.

Current plan: {{ tier }}
Used: {{ current }}/{{ limit }}

Upgrade your subscription to add more.";

/// Renderer that expands built-in minijinja templates.
#[derive(Debug)]
pub struct TemplateRenderer {
    environment: Environment<'static>,
}

impl TemplateRenderer {
    /// Creates a renderer with all built-in templates loaded.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] when a built-in template fails to
    /// compile, which indicates a packaging defect.
    pub fn new() -> Result<Self, RenderError> {
        let mut environment = Environment::new();
        let templates = [
            ("assignment", ASSIGNMENT_TEMPLATE),
            ("status_change", STATUS_CHANGE_TEMPLATE),
            ("comment", COMMENT_TEMPLATE),
            ("reminder", REMINDER_TEMPLATE),
            ("digest", DIGEST_TEMPLATE),
            ("limit", LIMIT_TEMPLATE),
        ];
        for (name, source) in templates {
            environment
                .add_template(name, source)
                .map_err(|error| RenderError::Template(error.to_string()))?;
        }
        Ok(Self { environment })
    }

    fn render<V: Serialize>(&self, name: &str, view: &V) -> Result<String, RenderError> {
        let template = self
            .environment
            .get_template(name)
            .map_err(|error| RenderError::Template(error.to_string()))?;
        template
            .render(view)
            .map_err(|error| RenderError::Template(error.to_string()))
    }
}

impl NotificationRenderer for TemplateRenderer {
    fn render_assignment(&self, view: &AssignmentView) -> Result<String, RenderError> {
        self.render("assignment", view)
    }

    fn render_status_change(&self, view: &StatusChangeView) -> Result<String, RenderError> {
        self.render("status_change", view)
    }

    fn render_comment(&self, view: &CommentView) -> Result<String, RenderError> {
        self.render("comment", view)
    }

    fn render_reminder(&self, view: &ReminderView) -> Result<String, RenderError> {
        self.render("reminder", view)
    }

    fn render_digest(&self, view: &DigestView) -> Result<String, RenderError> {
        self.render("digest", view)
    }

    fn render_limit_exceeded(&self, view: &LimitView) -> Result<String, RenderError> {
        self.render("limit", view)
    }
}
