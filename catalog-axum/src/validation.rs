//! Declarative request validation.
//!
//! Each route declares an ordered list of [`Chain`]s, one per path parameter
//! or body field. A chain holds checks that each contribute at most one
//! [`FieldError`]. Every check of every chain runs before the result is
//! inspected, so a client sees all problems with its request at once.
//!
//! Checks see values the way a form validator does: strings as they are,
//! numbers and booleans printed, and absent or `null` values as the empty
//! string. A JSON number `160` and a JSON string `"160"` are equally numeric.

use aide::{
    OperationInput,
    generate::GenContext,
    openapi::Operation,
};
use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, RawPathParams, Request},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Message used by checks that were not given one.
pub const DEFAULT_MESSAGE: &str = "Invalid value";

/// Message reported when the request body is not valid JSON.
pub const INVALID_BODY_MESSAGE: &str = "Cuerpo de la solicitud no valido";

/// Where in the request a validated value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// A path parameter
    Params,
    /// A field of the JSON body
    Body,
}

/// A single failed check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldError {
    /// The kind of error; `field` for a failed check
    #[serde(rename = "type")]
    pub kind: String,
    /// The offending value, absent when the field was not supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// A human-readable description of the failure
    pub msg: String,
    /// The name of the parameter or field
    pub path: String,
    /// Where the value was looked up
    pub location: Location,
}

/// The ordered list of failed checks for a request, rendered as
/// `400 Bad Request` with body `{"errors": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationErrors {
    /// Every failed check, in declaration order
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// True when no check failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn invalid_body() -> Self {
        Self {
            errors: vec![FieldError {
                kind: "body".to_string(),
                value: None,
                msg: INVALID_BODY_MESSAGE.to_string(),
                path: String::new(),
                location: Location::Body,
            }],
        }
    }
}

impl IntoResponse for ValidationErrors {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

/// A predicate over a possibly absent value.
pub type Predicate = fn(Option<&Value>) -> bool;

struct Check {
    predicate: Predicate,
    message: Cow<'static, str>,
}

/// An ordered list of checks on one path parameter or body field.
///
/// ```
/// use catalog_axum::validation::Chain;
///
/// let chain = Chain::param("id").is_int().with_message("ID no valido");
/// ```
pub struct Chain {
    field: &'static str,
    location: Location,
    checks: Vec<Check>,
}

impl Chain {
    /// Start a chain on a path parameter.
    pub fn param(field: &'static str) -> Self {
        Self::new(field, Location::Params)
    }

    /// Start a chain on a body field.
    pub fn body(field: &'static str) -> Self {
        Self::new(field, Location::Body)
    }

    fn new(field: &'static str, location: Location) -> Self {
        Self {
            field,
            location,
            checks: Vec::new(),
        }
    }

    /// The value is an integer that fits in 64 bits.
    pub fn is_int(self) -> Self {
        self.custom(is_int)
    }

    /// The value is a decimal number.
    pub fn is_numeric(self) -> Self {
        self.custom(is_numeric)
    }

    /// The value is one of `true`, `false`, `1` or `0`.
    pub fn is_boolean(self) -> Self {
        self.custom(is_boolean)
    }

    /// The value is present and not the empty string.
    pub fn not_empty(self) -> Self {
        self.custom(not_empty)
    }

    /// Add an arbitrary check.
    pub fn custom(mut self, predicate: Predicate) -> Self {
        self.checks.push(Check {
            predicate,
            message: Cow::Borrowed(DEFAULT_MESSAGE),
        });
        self
    }

    /// Set the message reported when the most recently added check fails.
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        if let Some(check) = self.checks.last_mut() {
            check.message = message.into();
        }
        self
    }

    fn run(&self, input: &RequestInput, errors: &mut Vec<FieldError>) {
        let value = input.value(self.location, self.field);
        for check in &self.checks {
            if !(check.predicate)(value) {
                errors.push(FieldError {
                    kind: "field".to_string(),
                    value: value.cloned(),
                    msg: check.message.to_string(),
                    path: self.field.to_string(),
                    location: self.location,
                });
            }
        }
    }
}

/// Run every chain against the input, collecting all failures in order.
pub fn run(chains: &[Chain], input: &RequestInput) -> ValidationErrors {
    let mut errors = Vec::new();
    for chain in chains {
        chain.run(input, &mut errors);
    }
    ValidationErrors { errors }
}

/// The raw inputs of a request: its path parameters and its JSON body.
#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    params: Map<String, Value>,
    body: Value,
}

impl RequestInput {
    /// Assemble an input from path parameters and a body.
    pub fn new<K: Into<String>, V: Into<String>>(
        params: impl IntoIterator<Item = (K, V)>,
        body: Value,
    ) -> Self {
        Self {
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
            body,
        }
    }

    /// Look up a value, if present.
    pub fn value(&self, location: Location, field: &str) -> Option<&Value> {
        match location {
            Location::Params => self.params.get(field),
            Location::Body => self.body.get(field),
        }
    }

    /// The value as text; absent values read as the empty string.
    pub fn text(&self, location: Location, field: &str) -> String {
        as_text(self.value(location, field)).into_owned()
    }

    /// The value as an integer.
    pub fn integer(&self, location: Location, field: &str) -> Option<i64> {
        self.text(location, field).parse().ok()
    }

    /// The value as a number.
    pub fn number(&self, location: Location, field: &str) -> Option<f64> {
        as_number(self.value(location, field))
    }

    /// The value as a boolean.
    pub fn boolean(&self, location: Location, field: &str) -> Option<bool> {
        match &*as_text(self.value(location, field)) {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }
}

/// Print a value the way the checks see it.
pub fn as_text(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(Value::Bool(b)) => Cow::Borrowed(if *b { "true" } else { "false" }),
        Some(Value::Number(n)) => Cow::Owned(number_text(n)),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

/// Floats in `[1e-6, 1e21)` print in positional notation, as a browser
/// would; only values outside that range keep an exponent.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if !n.is_i64() && !n.is_u64() => {
            let magnitude = f.abs();
            if f == 0.0 || (1e-6..1e21).contains(&magnitude) {
                f.to_string()
            } else {
                n.to_string()
            }
        }
        _ => n.to_string(),
    }
}

/// Coerce a value to a number. `null`, booleans and blank strings coerce to
/// 0 or 1; absent values, collections and non-numeric text do not coerce.
pub fn as_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn strip_sign(s: &str) -> &str {
    s.strip_prefix(['+', '-']).unwrap_or(s)
}

fn is_int(value: Option<&Value>) -> bool {
    let text = as_text(value);
    is_digits(strip_sign(&text)) && text.parse::<i64>().is_ok()
}

fn is_numeric(value: Option<&Value>) -> bool {
    let text = as_text(value);
    match strip_sign(&text).split_once('.') {
        Some((whole, fraction)) => {
            (whole.is_empty() || is_digits(whole)) && is_digits(fraction)
        }
        None => is_digits(strip_sign(&text)),
    }
}

fn is_boolean(value: Option<&Value>) -> bool {
    matches!(&*as_text(value), "true" | "false" | "1" | "0")
}

fn not_empty(value: Option<&Value>) -> bool {
    !as_text(value).is_empty()
}

/// A route input that is checked before its handler runs.
///
/// The extractor [`Valid`] runs [`Validate::rules`] over the request and only
/// calls [`Validate::extract`] once every check has passed.
pub trait Validate: Sized {
    /// The chains to run, in order.
    fn rules() -> Vec<Chain>;

    /// Build the input from a request that passed every check.
    fn extract(input: &RequestInput) -> Option<Self>;

    /// Describe the parameters and body of the route in the OpenAPI document.
    fn describe(_ctx: &mut GenContext, _operation: &mut Operation) {}
}

/// Extractor that validates a request and rejects it with
/// [`ValidationErrors`] before the handler runs.
pub struct Valid<T>(pub T);

impl<S, T> FromRequest<S> for Valid<T>
where
    S: Send + Sync,
    T: Validate + Send,
{
    type Rejection = ValidationErrors;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (mut parts, body) = req.into_parts();

        let params: Vec<(String, String)> =
            match RawPathParams::from_request_parts(&mut parts, state).await {
                Ok(params) => params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                Err(_) => Vec::new(),
            };

        let json = is_json(&parts.headers);
        let bytes = Bytes::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(|_| ValidationErrors::invalid_body())?;

        let body = if json && !bytes.is_empty() {
            serde_json::from_slice(&bytes).map_err(|_| ValidationErrors::invalid_body())?
        } else {
            Value::Object(Map::new())
        };

        let input = RequestInput::new(params, body);
        let errors = run(&T::rules(), &input);
        if !errors.is_empty() {
            tracing::debug!(errors = errors.errors.len(), "request rejected by validation");
            return Err(errors);
        }

        // every check passed, so extraction only fails if the rules and the
        // extraction disagree
        T::extract(&input)
            .map(Valid)
            .ok_or_else(ValidationErrors::invalid_body)
    }
}

impl<T: Validate> OperationInput for Valid<T> {
    fn operation_input(ctx: &mut GenContext, operation: &mut Operation) {
        T::describe(ctx, operation);
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn body(value: Value) -> RequestInput {
        RequestInput::new(Vec::<(String, String)>::new(), value)
    }

    #[rstest]
    #[case(json!("1"), true)]
    #[case(json!("-25"), true)]
    #[case(json!("+7"), true)]
    #[case(json!("007"), true)]
    #[case(json!(12), true)]
    #[case(json!("1.5"), false)]
    #[case(json!("not-valid-url"), false)]
    #[case(json!(""), false)]
    #[case(json!("99999999999999999999"), false)]
    fn int_check(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(is_int(Some(&value)), expected);
    }

    #[rstest]
    #[case(json!(160), true)]
    #[case(json!(0), true)]
    #[case(json!(12.5), true)]
    #[case(json!("300"), true)]
    #[case(json!("-3.75"), true)]
    #[case(json!(1e20), true)]
    #[case(json!(".5"), true)]
    #[case(json!("hola"), false)]
    #[case(json!("1."), false)]
    #[case(json!("1.2.3"), false)]
    #[case(json!(""), false)]
    #[case(json!(true), false)]
    #[case(json!([1]), false)]
    fn numeric_check(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(is_numeric(Some(&value)), expected);
    }

    #[rstest]
    #[case(json!(160), "160")]
    #[case(json!(160.0), "160")]
    #[case(json!(12.5), "12.5")]
    #[case(json!(1e20), "100000000000000000000")]
    #[case(json!(1e21), "1e21")]
    #[case(json!(-0.25), "-0.25")]
    fn numbers_print_positionally(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(as_text(Some(&value)), expected);
    }

    #[rstest]
    #[case(json!(true), true)]
    #[case(json!(false), true)]
    #[case(json!("true"), true)]
    #[case(json!("0"), true)]
    #[case(json!(1), true)]
    #[case(json!("yes"), false)]
    #[case(json!(null), false)]
    fn boolean_check(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(is_boolean(Some(&value)), expected);
    }

    #[test]
    fn absent_values_fail_every_builtin_check() {
        assert!(!is_int(None));
        assert!(!is_numeric(None));
        assert!(!is_boolean(None));
        assert!(!not_empty(None));
        assert!(!not_empty(Some(&json!(null))));
        assert!(not_empty(Some(&json!(0))));
    }

    #[rstest]
    #[case(Some(json!(160)), Some(160.0))]
    #[case(Some(json!("2.5")), Some(2.5))]
    #[case(Some(json!("hola")), None)]
    #[case(Some(json!("")), Some(0.0))]
    #[case(Some(json!(null)), Some(0.0))]
    #[case(Some(json!(true)), Some(1.0))]
    #[case(None, None)]
    fn number_coercion(#[case] value: Option<Value>, #[case] expected: Option<f64>) {
        assert_eq!(as_number(value.as_ref()), expected);
    }

    #[test]
    fn every_failing_check_is_reported_in_order() {
        let chains = [
            Chain::body("name").not_empty().with_message("name"),
            Chain::body("price")
                .is_numeric()
                .with_message("numeric")
                .not_empty()
                .with_message("present"),
        ];

        let errors = run(&chains, &body(json!({})));
        let messages: Vec<_> = errors.errors.iter().map(|e| e.msg.as_str()).collect();
        assert_eq!(messages, ["name", "numeric", "present"]);
        assert!(errors.errors.iter().all(|e| e.value.is_none()));
        assert!(errors.errors.iter().all(|e| e.location == Location::Body));
    }

    #[test]
    fn unlabelled_checks_use_the_default_message() {
        let errors = run(&[Chain::body("price").is_numeric()], &body(json!({ "price": "x" })));
        assert_eq!(errors.errors.len(), 1);
        assert_eq!(errors.errors[0].msg, DEFAULT_MESSAGE);
        assert_eq!(errors.errors[0].value, Some(json!("x")));
    }

    #[test]
    fn params_are_looked_up_separately_from_the_body() {
        let input = RequestInput::new([("id", "12")], json!({ "id": "doce" }));
        assert_eq!(input.integer(Location::Params, "id"), Some(12));
        assert!(run(&[Chain::param("id").is_int()], &input).is_empty());
        assert!(!run(&[Chain::body("id").is_int()], &input).is_empty());
    }

    #[test]
    fn errors_serialize_in_the_documented_shape() {
        let input = RequestInput::new([("id", "abc")], json!({}));
        let errors = run(&[Chain::param("id").is_int().with_message("ID no valido")], &input);
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({
                "errors": [{
                    "type": "field",
                    "value": "abc",
                    "msg": "ID no valido",
                    "path": "id",
                    "location": "params"
                }]
            })
        );
    }

    #[test]
    fn json_content_types() {
        let mut headers = HeaderMap::new();
        assert!(!is_json(&headers));
        headers.insert(header::CONTENT_TYPE, "application/json; charset=utf-8".parse().unwrap());
        assert!(is_json(&headers));
        headers.insert(header::CONTENT_TYPE, "application/merge-patch+json".parse().unwrap());
        assert!(is_json(&headers));
        headers.insert(header::CONTENT_TYPE, "text/plain".parse().unwrap());
        assert!(!is_json(&headers));
    }
}
