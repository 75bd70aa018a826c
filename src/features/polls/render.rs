use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use serde_json::{Map, Value};
use tera::{Context, Tera};

use crate::core::error::AppError;
use crate::features::polls::dto::RequestContext;

pub type TemplateContext = Map<String, Value>;

pub trait ResponseRenderer: Send + Sync {
    fn render(
        &self,
        template_name: &str,
        context: TemplateContext,
        request: &RequestContext,
    ) -> Result<Response, AppError>;

    fn text(&self, body: String) -> Response {
        (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}

pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    /// Loads every `.html` file below `template_dir`, named by its relative path.
    pub fn new(template_dir: &str) -> Result<Self, AppError> {
        let pattern = format!("{}/**/*.html", template_dir.trim_end_matches('/'));
        let tera = Tera::new(&pattern).map_err(|err| {
            AppError::configuration(format!("failed to load templates from {pattern}: {err}"))
        })?;
        Ok(Self { tera })
    }

    pub fn from_templates<'a>(
        templates: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, AppError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(templates)
            .map_err(|err| AppError::configuration(format!("invalid template: {err}")))?;
        Ok(Self { tera })
    }
}

impl ResponseRenderer for TeraRenderer {
    fn render(
        &self,
        template_name: &str,
        mut context: TemplateContext,
        request: &RequestContext,
    ) -> Result<Response, AppError> {
        let request_value = serde_json::to_value(request)
            .map_err(|err| AppError::internal(format!("failed to serialise request: {err}")))?;
        context.insert("request".to_string(), request_value);

        let tera_context = Context::from_serialize(&context)
            .map_err(|err| AppError::template(format!("invalid context for {template_name}: {err}")))?;
        let html = self
            .tera
            .render(template_name, &tera_context)
            .map_err(|err| AppError::template(format!("failed to render {template_name}: {err}")))?;

        Ok(Html(html).into_response())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn renders_context_values() {
        let renderer =
            TeraRenderer::from_templates([("greeting.html", "Hello {{ name }} via {{ request.path }}")])
                .unwrap();
        let mut context = TemplateContext::new();
        context.insert("name".to_string(), Value::String("polls".to_string()));

        let response = renderer
            .render("greeting.html", context, &RequestContext::new("GET", "/polls/"))
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
    }

    #[test]
    fn missing_template_is_a_template_error() {
        let renderer = TeraRenderer::from_templates([("a.html", "a")]).unwrap();
        let err = renderer
            .render("missing.html", TemplateContext::new(), &RequestContext::default())
            .unwrap_err();
        assert!(matches!(err, AppError::Template(_)));
    }
}
