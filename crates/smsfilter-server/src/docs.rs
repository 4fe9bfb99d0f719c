//! OpenAPI document and interactive API docs page

use axum::response::Html;
use axum::Json;
use serde_json::{json, Value};

pub const APISPEC_PATH: &str = "/apispec_1.json";
pub const APIDOCS_PATH: &str = "/apidocs";

const SWAGGER_UI: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>smsfilter API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "/apispec_1.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

/// OpenAPI 3 description of the prediction endpoints
pub fn openapi_spec() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "SMS spam classifier",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "paths": {
            "/predict": {
                "post": {
                    "summary": "Predict whether an SMS is spam.",
                    "requestBody": {
                        "required": true,
                        "description": "message to be classified.",
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "required": ["sms"],
                                    "properties": {
                                        "sms": {
                                            "type": "string",
                                            "example": "This is an example of an SMS."
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "The result of the classification: 'spam' or 'ham' with confidence.",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Prediction" }
                                }
                            }
                        }
                    }
                }
            },
            "/bulk": {
                "post": {
                    "summary": "Predict the spam status of multiple SMS messages.",
                    "requestBody": {
                        "required": true,
                        "description": "messages to be classified.",
                        "content": {
                            "application/json": {
                                "schema": {
                                    "type": "object",
                                    "required": ["bulk"],
                                    "properties": {
                                        "bulk": {
                                            "type": "array",
                                            "items": { "type": "string" },
                                            "example": [
                                                "This is an example of an SMS.",
                                                "Another example SMS."
                                            ]
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "responses": {
                        "200": {
                            "description": "The results of the classification for each SMS.",
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "array",
                                        "items": { "$ref": "#/components/schemas/BulkPrediction" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Label": { "type": "string", "enum": ["ham", "spam"] },
                "Prediction": {
                    "type": "object",
                    "properties": {
                        "result": { "$ref": "#/components/schemas/Label" },
                        "confidence": { "type": "number", "minimum": 0, "maximum": 1 },
                        "classifier": { "type": "string" },
                        "sms": { "type": "string" }
                    }
                },
                "BulkPrediction": {
                    "type": "object",
                    "properties": {
                        "result": { "$ref": "#/components/schemas/Label" },
                        "classifier": { "type": "string" },
                        "sms": { "type": "string" }
                    }
                }
            }
        }
    })
}

pub async fn apispec() -> Json<Value> {
    Json(openapi_spec())
}

pub async fn apidocs() -> Html<&'static str> {
    Html(SWAGGER_UI)
}
