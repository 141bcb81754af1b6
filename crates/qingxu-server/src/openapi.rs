//! Static Swagger 2.0 description of the public API, served at `/swagger.json`.

use serde_json::{Value, json};

pub fn document() -> Value {
    json!({
        "swagger": "2.0",
        "basePath": "/",
        "info": {
            "title": "Chinese Emotion Analysis API",
            "version": "1.0",
            "description": "API for analyzing emotions in Chinese text"
        },
        "produces": ["application/json"],
        "consumes": ["application/json"],
        "tags": [
            { "name": "emotion", "description": "Emotion Analysis Operations" }
        ],
        "paths": {
            "/emotion/analyze": {
                "post": {
                    "tags": ["emotion"],
                    "operationId": "post_emotion_analysis",
                    "summary": "Analyze emotion in the provided Chinese text",
                    "parameters": [{
                        "name": "payload",
                        "in": "body",
                        "required": true,
                        "schema": { "$ref": "#/definitions/EmotionRequest" }
                    }],
                    "responses": {
                        "200": {
                            "description": "Success",
                            "schema": { "$ref": "#/definitions/EmotionResponse" }
                        },
                        "400": {
                            "description": "Missing or malformed text",
                            "schema": { "$ref": "#/definitions/Error" }
                        },
                        "500": {
                            "description": "Inference failure",
                            "schema": { "$ref": "#/definitions/Error" }
                        }
                    }
                }
            },
            "/health": {
                "get": {
                    "operationId": "get_health",
                    "responses": { "200": { "description": "Service is ready" } }
                }
            }
        },
        "definitions": {
            "EmotionRequest": {
                "type": "object",
                "required": ["text"],
                "properties": {
                    "text": { "type": "string", "description": "Chinese text to analyze" }
                }
            },
            "EmotionResponse": {
                "type": "object",
                "properties": {
                    "emotion": {
                        "type": "integer",
                        "enum": [0, 1],
                        "description": "Predicted emotion category (0 = negative, 1 = positive)"
                    },
                    "intensity": {
                        "type": "number",
                        "description": "Predicted emotion intensity (nominally 0-1, not clamped)"
                    },
                    "probabilities": {
                        "type": "object",
                        "description": "Probability distribution for each emotion class",
                        "additionalProperties": { "type": "number" }
                    }
                }
            },
            "Error": {
                "type": "object",
                "properties": {
                    "error": { "type": "string" },
                    "message": { "type": "string" }
                }
            }
        }
    })
}
