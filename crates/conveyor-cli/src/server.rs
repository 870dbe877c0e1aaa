use conveyor_core::{LineReport, ModelError, Parameters as LineParameters, evaluate};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use crate::config::ParamOverrides;
use crate::render::{collect_frames, collect_points};

/// Stateless MCP host. Every tool call evaluates its own parameter set:
/// the server's base parameters with the request's overrides on top.
#[derive(Clone)]
pub struct LineServer {
    base: LineParameters,
    tool_router: ToolRouter<Self>,
}

impl LineServer {
    pub fn new(base: LineParameters) -> Self {
        Self {
            base,
            tool_router: Self::tool_router(),
        }
    }

    fn evaluate(&self, overrides: &ParamOverrides) -> Result<LineReport, McpError> {
        evaluate(&overrides.over(&self.base)).map_err(model_error)
    }
}

fn model_error(e: ModelError) -> McpError {
    McpError::invalid_params(e.to_string(), None)
}

fn internal(e: anyhow::Error) -> McpError {
    McpError::internal_error(e.to_string(), None)
}

fn json_result(value: &serde_json::Value) -> CallToolResult {
    CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(value).unwrap_or_default(),
    )])
}

#[tool_router]
impl LineServer {
    #[tool(
        description = "Compute packing-line KPIs: packing capacity, capacity shortfall, hours until the conveyor overflows (null when the tables keep up), utilization, table split, belt capacity, pack time and input interval. All parameters are optional overrides of the server's configured line."
    )]
    async fn line_kpis(
        &self,
        Parameters(req): Parameters<ParamOverrides>,
    ) -> Result<CallToolResult, McpError> {
        let report = self.evaluate(&req)?;
        let value = serde_json::to_value(report.kpis())
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(json_result(&value))
    }

    #[tool(
        description = "Project conveyor buffer fill-up hour by hour. Returns points of (hour, totes_waiting) clamped at belt capacity, or overflow=false when packing capacity meets the input rate."
    )]
    async fn line_projection(
        &self,
        Parameters(req): Parameters<ParamOverrides>,
    ) -> Result<CallToolResult, McpError> {
        let report = self.evaluate(&req)?;
        let (points, truncated) = collect_points(&report).map_err(internal)?;
        let value = match points {
            Some(points) => serde_json::json!({
                "overflow": true,
                "hours_until_overflow": report.kpis().hours_until_overflow,
                "conveyor_capacity": report.conveyor_capacity(),
                "points": points,
                "truncated": truncated,
            }),
            None => serde_json::json!({
                "overflow": false,
                "conveyor_capacity": report.conveyor_capacity(),
                "points": [],
            }),
        };
        Ok(json_result(&value))
    }

    #[tool(
        description = "Render the conveyor animation as text frames. Totes enter one tick apart and move one cell per tick until every tote has left the belt. Each frame is a strip of cells: a box for an occupied cell, a dash for an empty one."
    )]
    async fn line_frames(
        &self,
        Parameters(req): Parameters<ParamOverrides>,
    ) -> Result<CallToolResult, McpError> {
        let report = self.evaluate(&req)?;
        let (frames, truncated) = collect_frames(&report).map_err(internal)?;
        let value = serde_json::json!({
            "num_cells": report.conveyor_capacity(),
            "num_totes": report.params().num_totes,
            "animation_speed": report.params().animation_speed,
            "frames": frames,
            "truncated": truncated,
        });
        Ok(json_result(&value))
    }
}

#[tool_handler]
impl ServerHandler for LineServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Packing-line throughput calculator. Tools are stateless: each call evaluates \
                 the configured line with any parameters you pass overriding it.\n\
                 - line_kpis: can the packing tables keep up with incoming totes?\n\
                 - line_projection: how fast does the conveyor buffer fill when they cannot?\n\
                 - line_frames: text animation of totes moving along the belt.\n\
                 Invalid parameters (non-positive rates or lengths, more slow tables than \
                 tables, zero totes) are rejected with an invalid_params error."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
