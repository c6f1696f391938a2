//! Line charts comparing the MCP and HSP planners on benchmark results,
//! one resolution-time chart and one step-count chart per problem domain.

pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod fonts;
pub mod report;
