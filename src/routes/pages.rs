//! Server-rendered HTML pages: country list, add/edit forms, delete.
//!
//! Markup is built by hand and every interpolated value is escaped. On a
//! failed submit the form is re-rendered with the error message and the
//! submitted values, mirroring the JSON API's business rules.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use std::fmt::Write;

use crate::error::CountryError;
use crate::models::{Country, CountryForm};
use crate::state::AppState;

/// GET /countries - List all countries.
pub async fn list(State(state): State<AppState>) -> Response {
    match state.scenarios.get_all().await {
        Ok(countries) => Html(render_list(&countries, None)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /countries/new - Empty create form.
pub async fn new_form() -> Html<String> {
    let empty = Country {
        short_name: String::new(),
        full_name: String::new(),
        iso_alpha2: String::new(),
        iso_alpha3: String::new(),
        iso_numeric: String::new(),
        population: 0,
        square: 0.0,
    };
    Html(render_form("Add New Country", FormAction::Add, &empty, None))
}

/// POST /countries/new - Handle the create form submit.
pub async fn create(State(state): State<AppState>, Form(form): Form<CountryForm>) -> Response {
    let country = Country::from(form);
    match state.scenarios.store(&country).await {
        Ok(()) => {
            list_with_flash(&state, Flash::Success("Country added successfully!")).await
        }
        Err(e @ CountryError::Storage(_)) => e.into_response(),
        Err(e) => Html(render_form(
            "Add New Country",
            FormAction::Add,
            &country,
            Some(&e.to_string()),
        ))
        .into_response(),
    }
}

/// GET /countries/{code}/edit - Edit form pre-filled from the stored row.
pub async fn edit_form(State(state): State<AppState>, Path(code): Path<String>) -> Response {
    match state.scenarios.get(&code).await {
        Ok(country) => {
            let title = format!("Edit Country: {}", country.short_name);
            Html(render_form(&title, FormAction::Edit, &country, None)).into_response()
        }
        Err(e @ CountryError::Storage(_)) => e.into_response(),
        // Unknown or malformed codes both render as a missing page.
        Err(_) => (StatusCode::NOT_FOUND, "Country not found").into_response(),
    }
}

/// POST /countries/{code}/edit - Handle the edit form submit. The code
/// inputs are read-only in the form, but the submitted values still pass
/// through the service layer's immutable-codes check.
pub async fn update(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Form(form): Form<CountryForm>,
) -> Response {
    let country = Country::from(form);
    match state.scenarios.edit(&code, &country).await {
        Ok(()) => {
            list_with_flash(&state, Flash::Success("Country updated successfully!")).await
        }
        Err(CountryError::NotFound { .. }) => {
            (StatusCode::NOT_FOUND, "Country not found").into_response()
        }
        Err(e @ CountryError::Storage(_)) => e.into_response(),
        Err(e) => {
            let original = match state.scenarios.get(&code).await {
                Ok(c) => c,
                Err(_) => return (StatusCode::NOT_FOUND, "Country not found").into_response(),
            };
            let title = format!("Edit Country: {}", original.short_name);
            Html(render_form(
                &title,
                FormAction::Edit,
                &country,
                Some(&e.to_string()),
            ))
            .into_response()
        }
    }
}

/// POST /countries/{code}/delete - Delete and re-render the list. A row that
/// is already gone is reported as a warning flash, not an error page.
pub async fn delete(State(state): State<AppState>, Path(code): Path<String>) -> Response {
    let flash = match state.scenarios.delete(&code).await {
        Ok(()) => Flash::Success("Country deleted successfully!"),
        Err(CountryError::NotFound { .. }) => {
            Flash::Warning("Country not found or already deleted.")
        }
        Err(CountryError::InvalidCode { .. }) => {
            return (StatusCode::NOT_FOUND, "Invalid country code").into_response()
        }
        Err(e) => return e.into_response(),
    };
    list_with_flash(&state, flash).await
}

enum Flash {
    Success(&'static str),
    Warning(&'static str),
}

impl Flash {
    fn class(&self) -> &'static str {
        match self {
            Flash::Success(_) => "success",
            Flash::Warning(_) => "warning",
        }
    }

    fn message(&self) -> &'static str {
        match self {
            Flash::Success(m) | Flash::Warning(m) => m,
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum FormAction {
    Add,
    Edit,
}

async fn list_with_flash(state: &AppState, flash: Flash) -> Response {
    match state.scenarios.get_all().await {
        Ok(countries) => Html(render_list(&countries, Some(flash))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Escape a value for interpolation into HTML text or attributes.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{}</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<main>
{}
</main>
</body>
</html>
"#,
        escape(title),
        content
    )
}

fn render_list(countries: &[Country], flash: Option<Flash>) -> String {
    let mut content = String::from("<h1>All Countries</h1>\n");

    if let Some(flash) = flash {
        let _ = writeln!(
            content,
            r#"<div class="alert alert-{}">{}</div>"#,
            flash.class(),
            escape(flash.message())
        );
    }

    content.push_str(r#"<p><a href="/countries/new" class="btn">Add New Country</a></p>"#);
    content.push_str(
        "\n<table>\n<thead>\n<tr>\
         <th>Short Name</th><th>Full Name</th><th>ISO Alpha-2</th><th>ISO Alpha-3</th>\
         <th>ISO Numeric</th><th>Population</th><th>Square (km&#178;)</th><th>Actions</th>\
         </tr>\n</thead>\n<tbody>\n",
    );

    if countries.is_empty() {
        content.push_str(r#"<tr><td colspan="8">No countries found.</td></tr>"#);
        content.push('\n');
    } else {
        for country in countries {
            let _ = writeln!(
                content,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td>\
                 <td><a href=\"/countries/{code}/edit\">Edit</a> \
                 <form method=\"post\" action=\"/countries/{code}/delete\" class=\"inline\">\
                 <button type=\"submit\">Delete</button></form></td></tr>",
                escape(&country.short_name),
                escape(&country.full_name),
                escape(&country.iso_alpha2),
                escape(&country.iso_alpha3),
                escape(&country.iso_numeric),
                country.population,
                country.square,
                code = escape(&country.iso_alpha3),
            );
        }
    }

    content.push_str("</tbody>\n</table>\n");
    layout("Countries List", &content)
}

fn render_form(title: &str, action: FormAction, country: &Country, error: Option<&str>) -> String {
    let mut content = String::new();
    let _ = writeln!(content, "<h1>{}</h1>", escape(title));

    if let Some(error) = error {
        let _ = writeln!(
            content,
            r#"<div class="alert alert-danger">{}</div>"#,
            escape(error)
        );
    }

    let target = match action {
        FormAction::Add => "/countries/new".to_string(),
        FormAction::Edit => format!("/countries/{}/edit", escape(&country.iso_alpha3)),
    };
    // Codes are immutable after creation, so the edit form locks them.
    let code_readonly = if action == FormAction::Edit {
        " readonly"
    } else {
        ""
    };

    let _ = write!(
        content,
        r#"<form method="post" action="{target}">
<label>Short Name <input type="text" name="shortName" value="{short_name}" required></label>
<label>Full Name <input type="text" name="fullName" value="{full_name}" required></label>
<label>ISO Alpha-2 <input type="text" name="isoAlpha2" value="{alpha2}" maxlength="2" required{code_readonly}></label>
<label>ISO Alpha-3 <input type="text" name="isoAlpha3" value="{alpha3}" maxlength="3" required{code_readonly}></label>
<label>ISO Numeric <input type="text" name="isoNumeric" value="{numeric}" maxlength="3" required{code_readonly}></label>
<label>Population <input type="number" name="population" value="{population}" min="0" required></label>
<label>Square (km&#178;) <input type="number" name="square" value="{square}" min="0" step="any" required></label>
<button type="submit">Save</button>
<a href="/countries">Cancel</a>
</form>
"#,
        target = target,
        short_name = escape(&country.short_name),
        full_name = escape(&country.full_name),
        alpha2 = escape(&country.iso_alpha2),
        alpha3 = escape(&country.iso_alpha3),
        numeric = escape(&country.iso_numeric),
        population = country.population,
        square = country.square,
        code_readonly = code_readonly,
    );

    layout(title, &content)
}
