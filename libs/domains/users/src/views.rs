//! Server-rendered pages.
//!
//! Handlebars escapes every `{{value}}`, so user input is safe to render.

use handlebars::Handlebars;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::error::{UserError, UserResult};
use crate::form::{BoundForm, FieldDescriptor, USER_FORM, WidgetKind};
use crate::models::User;

/// Template registry for the user pages.
#[derive(Clone)]
pub struct UserViews {
    handlebars: Arc<Handlebars<'static>>,
}

#[derive(Serialize)]
struct IndexPage<'a> {
    title: &'a str,
    users: Vec<UserRow<'a>>,
}

#[derive(Serialize)]
struct UserRow<'a> {
    id: i32,
    username: &'a str,
    full_name: String,
    email: &'a str,
    role: &'static str,
    is_active: bool,
}

#[derive(Serialize)]
struct AddPage<'a> {
    title: &'a str,
    has_errors: bool,
    fields: Vec<FieldView<'a>>,
}

#[derive(Serialize)]
struct FieldView<'a> {
    name: &'static str,
    label: &'static str,
    input_type: &'static str,
    is_choice: bool,
    is_checkbox: bool,
    required: bool,
    maxlength: Option<usize>,
    value: &'a str,
    checked: bool,
    placeholder: Option<&'static str>,
    options: Vec<OptionView>,
    error: Option<&'a str>,
}

#[derive(Serialize)]
struct OptionView {
    label: &'static str,
    value: &'static str,
    selected: bool,
}

#[derive(Serialize)]
struct ViewPage<'a> {
    title: &'a str,
    username: &'a str,
    email: &'a str,
}

impl UserViews {
    /// Create the registry with all templates registered.
    pub fn new() -> UserResult<Self> {
        let mut handlebars = Handlebars::new();

        handlebars
            .register_partial("layout", LAYOUT_TEMPLATE)
            .map_err(|e| UserError::Template(format!("Failed to register layout: {}", e)))?;
        handlebars
            .register_template_string("index", INDEX_TEMPLATE)
            .map_err(|e| UserError::Template(format!("Failed to register index: {}", e)))?;
        handlebars
            .register_template_string("add", ADD_TEMPLATE)
            .map_err(|e| UserError::Template(format!("Failed to register add: {}", e)))?;
        handlebars
            .register_template_string("view", VIEW_TEMPLATE)
            .map_err(|e| UserError::Template(format!("Failed to register view: {}", e)))?;

        Ok(Self {
            handlebars: Arc::new(handlebars),
        })
    }

    fn render<T: Serialize>(&self, template_name: &str, data: &T) -> UserResult<String> {
        self.handlebars
            .render(template_name, data)
            .map_err(|e| UserError::Template(e.to_string()))
    }

    /// Listing table of all users.
    pub fn render_index(&self, users: &[User]) -> UserResult<String> {
        debug!(count = users.len(), "Rendering user list");

        let rows = users
            .iter()
            .map(|user| UserRow {
                id: user.id,
                username: &user.username,
                full_name: user.full_name(),
                email: &user.email,
                role: user.role.label(),
                is_active: user.is_active,
            })
            .collect();

        self.render(
            "index",
            &IndexPage {
                title: "Usuarios",
                users: rows,
            },
        )
    }

    /// Creation form, pre-filled from `form` with its errors inline.
    pub fn render_add(&self, form: &BoundForm) -> UserResult<String> {
        let fields = USER_FORM
            .iter()
            .map(|descriptor| field_view(descriptor, form))
            .collect();

        self.render(
            "add",
            &AddPage {
                title: "Nuevo usuario",
                has_errors: !form.is_valid(),
                fields,
            },
        )
    }

    /// Single user's username and email.
    pub fn render_view(&self, user: &User) -> UserResult<String> {
        self.render(
            "view",
            &ViewPage {
                title: &user.username,
                username: &user.username,
                email: &user.email,
            },
        )
    }
}

fn field_view<'a>(descriptor: &FieldDescriptor, form: &'a BoundForm) -> FieldView<'a> {
    let value = form.value(descriptor.name);
    let error = form.error_for(descriptor.name);

    let (input_type, options) = match descriptor.kind {
        WidgetKind::Text => ("text", Vec::new()),
        WidgetKind::Email => ("email", Vec::new()),
        WidgetKind::Password => ("password", Vec::new()),
        WidgetKind::Checkbox => ("checkbox", Vec::new()),
        WidgetKind::Choice(choices) => (
            "select",
            choices
                .iter()
                .map(|&(label, stored)| OptionView {
                    label,
                    value: stored,
                    selected: value == stored || value == label,
                })
                .collect(),
        ),
    };

    FieldView {
        name: descriptor.name,
        label: descriptor.label,
        input_type,
        is_choice: matches!(descriptor.kind, WidgetKind::Choice(_)),
        is_checkbox: descriptor.kind == WidgetKind::Checkbox,
        required: descriptor.required,
        maxlength: descriptor.max_length,
        value,
        // A rejected checkbox value renders unchecked
        checked: error.is_none() && !value.is_empty() && value != "0",
        placeholder: descriptor.placeholder,
        options,
        error,
    }
}

const LAYOUT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="utf-8">
  <title>{{title}}</title>
</head>
<body>
  <nav>
    <a href="/users">Usuarios</a> |
    <a href="/users/add">Nuevo usuario</a>
  </nav>
  <main>
    {{> @partial-block}}
  </main>
</body>
</html>
"#;

const INDEX_TEMPLATE: &str = r#"{{#> layout}}
<h1>Usuarios</h1>
{{#if users}}
<table>
  <thead>
    <tr><th>Username</th><th>Nombre</th><th>Email</th><th>Rol</th><th>Activo</th><th></th></tr>
  </thead>
  <tbody>
    {{#each users}}
    <tr>
      <td>{{username}}</td>
      <td>{{full_name}}</td>
      <td>{{email}}</td>
      <td>{{role}}</td>
      <td>{{#if is_active}}Sí{{else}}No{{/if}}</td>
      <td><a href="/users/view/{{id}}">Ver</a></td>
    </tr>
    {{/each}}
  </tbody>
</table>
{{else}}
<p>No hay usuarios.</p>
{{/if}}
<p><a href="/users/add">Nuevo usuario</a></p>
{{/layout}}
"#;

const ADD_TEMPLATE: &str = r#"{{#> layout}}
<h1>Nuevo usuario</h1>
{{#if has_errors}}
<p class="form-errors">Revisa los errores del formulario.</p>
{{/if}}
<form method="post" action="/users/create" novalidate>
  {{#each fields}}
  <div class="field{{#if error}} has-error{{/if}}">
    {{#if is_checkbox}}
    <label><input type="checkbox" id="{{name}}" name="{{name}}" value="1"{{#if checked}} checked{{/if}}> {{label}}</label>
    {{else}}
    <label for="{{name}}">{{label}}</label>
    {{#if is_choice}}
    <select id="{{name}}" name="{{name}}"{{#if required}} required{{/if}}>
      {{#if placeholder}}<option value="">{{placeholder}}</option>{{/if}}
      {{#each options}}
      <option value="{{value}}"{{#if selected}} selected{{/if}}>{{label}}</option>
      {{/each}}
    </select>
    {{else}}
    <input type="{{input_type}}" id="{{name}}" name="{{name}}" value="{{value}}"{{#if maxlength}} maxlength="{{maxlength}}"{{/if}}{{#if required}} required{{/if}}>
    {{/if}}
    {{/if}}
    {{#if error}}<p class="error">{{error}}</p>{{/if}}
  </div>
  {{/each}}
  <button type="submit" name="save">Guardar</button>
</form>
{{/layout}}
"#;

const VIEW_TEMPLATE: &str = r#"{{#> layout}}
<p>Usuario: {{username}} con Email: {{email}}</p>
<p><a href="/users">Volver al listado</a></p>
{{/layout}}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{ALREADY_USED, bind};
    use crate::models::{Role, UserDraft};
    use chrono::Utc;
    use std::collections::HashMap;

    fn user(id: i32, username: &str) -> User {
        let now = Utc::now();
        User {
            id,
            username: username.to_string(),
            first_name: Some("Ana".into()),
            last_name: Some("García".into()),
            email: format!("{}@example.com", username),
            password: "$argon2id$encoded".into(),
            role: Role::Admin,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_render_index_lists_users() {
        let views = UserViews::new().unwrap();
        let html = views
            .render_index(&[user(1, "ana"), user(2, "bob")])
            .unwrap();

        assert!(html.contains("<title>Usuarios</title>"));
        assert!(html.contains("ana@example.com"));
        assert!(html.contains("/users/view/2"));
        assert!(html.contains("Administrador"));
        assert!(html.contains("Ana García"));
        assert!(!html.contains("$argon2id$"));
    }

    #[test]
    fn test_render_index_empty() {
        let views = UserViews::new().unwrap();
        let html = views.render_index(&[]).unwrap();
        assert!(html.contains("No hay usuarios."));
    }

    #[test]
    fn test_render_index_escapes_input() {
        let views = UserViews::new().unwrap();
        let html = views.render_index(&[user(1, "<b>ana</b>")]).unwrap();
        assert!(html.contains("&lt;b&gt;ana&lt;/b&gt;"));
        assert!(!html.contains("<b>ana</b>"));
    }

    #[test]
    fn test_render_add_empty_form() {
        let views = UserViews::new().unwrap();
        let html = views.render_add(&BoundForm::default()).unwrap();

        assert!(html.contains(r#"action="/users/create""#));
        assert!(html.contains(r#"name="firstName""#));
        assert!(html.contains(r#"<option value="">Selecciona un rol</option>"#));
        assert!(html.contains(r#"<option value="ROLE_ADMIN">Administrador</option>"#));
        assert!(html.contains(r#"type="checkbox""#));
        assert!(!html.contains("form-errors"));
    }

    #[test]
    fn test_render_add_keeps_input_and_errors() {
        let input: HashMap<String, String> = [
            ("username", "ana"),
            ("email", "broken"),
            ("password", "secret"),
            ("role", "Usuario"),
            ("isActive", "on"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let mut draft = UserDraft::default();
        let mut form = bind(USER_FORM, &input, &mut draft);
        form.add_error("username", ALREADY_USED);

        let views = UserViews::new().unwrap();
        let html = views.render_add(&form).unwrap();

        assert!(html.contains("form-errors"));
        assert!(html.contains(r#"value="ana""#));
        assert!(html.contains(r#"value="broken""#));
        assert!(html.contains("This value is not a valid email address."));
        assert!(html.contains(ALREADY_USED));
        assert!(html.contains(r#"<option value="ROLE_USER" selected>Usuario</option>"#));
        assert!(html.contains(" checked>"));
        assert!(!html.contains("secret"));
    }

    #[test]
    fn test_render_add_rejected_checkbox_is_unchecked() {
        let input: HashMap<String, String> = [("username", "ana"), ("isActive", "maybe")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let mut draft = UserDraft::default();
        let form = bind(USER_FORM, &input, &mut draft);
        assert!(form.error_for("isActive").is_some());

        let views = UserViews::new().unwrap();
        let html = views.render_add(&form).unwrap();

        assert!(html.contains(r#"name="isActive" value="1">"#));
        assert!(!html.contains(" checked>"));
    }

    #[test]
    fn test_render_view_shows_username_and_email() {
        let views = UserViews::new().unwrap();
        let html = views.render_view(&user(3, "ana")).unwrap();
        assert!(html.contains("Usuario: ana con Email: ana@example.com"));
    }
}
