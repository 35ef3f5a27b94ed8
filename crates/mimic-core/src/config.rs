//! 声明式插件配置
//!
//! 对应宿主模型描述里的插件元素，键名保持宿主侧的写法
//! （`joint`, `mimicJoint`, `hasPID`, `sensitiveness`, `maxEffort`）。
//!
//! PID 增益不在插件元素里，而是放在以主关节命名的参数空间
//! `gains.<joint>.p|i|d|i_clamp` 中，由 [`ParameterTable`] 提供。
//!
//! # 示例
//!
//! ```rust
//! use mimic_core::config::MimicDescription;
//! use mimic_core::host::ParameterServer;
//!
//! let description = MimicDescription::from_toml_str(r#"
//!     joint = "drive_joint"
//!     mimicJoint = "left_finger"
//!     hasPID = true
//!     multiplier = -1.0
//!
//!     [gains.drive_joint]
//!     p = 25.0
//! "#).unwrap();
//!
//! assert!(description.config.has_pid);
//! let mut params = description.parameters();
//! assert_eq!(params.declare_parameter("gains.drive_joint.p", 10.0), 25.0);
//! assert_eq!(params.declare_parameter("gains.drive_joint.i", 0.1), 0.1);
//! ```

use crate::error::ConfigError;
use crate::host::ParameterServer;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::warn;

/// 插件元素
///
/// 所有键都是可选的：缺失的必填键由校验门报告，而不是在反序列化时失败。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MimicConfig {
    /// 主关节名称（必填）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joint: Option<String>,

    /// 从动关节名称（必填）
    #[serde(
        rename = "mimicJoint",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub mimic_joint: Option<String>,

    /// 是否启用 PID 力控
    ///
    /// 只看键是否存在，值本身被忽略（`hasPID = false` 同样启用）。
    #[serde(
        rename = "hasPID",
        default,
        deserialize_with = "deserialize_presence",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub has_pid: bool,

    /// 角度倍率（默认 1.0）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,

    /// 角度偏移（默认 0.0 rad）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<f64>,

    /// 死区（默认 0.0 rad）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitiveness: Option<f64>,

    /// 最大力矩（默认取从动关节的力矩限制）
    #[serde(
        rename = "maxEffort",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub max_effort: Option<f64>,
}

impl MimicConfig {
    /// 创建只包含两个必填键的配置
    pub fn new(joint: impl Into<String>, mimic_joint: impl Into<String>) -> Self {
        Self {
            joint: Some(joint.into()),
            mimic_joint: Some(mimic_joint.into()),
            ..Self::default()
        }
    }

    /// 启用 PID 力控
    pub fn with_pid(mut self) -> Self {
        self.has_pid = true;
        self
    }

    /// 设置倍率
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = Some(multiplier);
        self
    }

    /// 设置偏移
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// 设置死区
    pub fn with_sensitiveness(mut self, sensitiveness: f64) -> Self {
        self.sensitiveness = Some(sensitiveness);
        self
    }

    /// 设置最大力矩
    pub fn with_max_effort(mut self, max_effort: f64) -> Self {
        self.max_effort = Some(max_effort);
        self
    }
}

fn deserialize_presence<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    serde::de::IgnoredAny::deserialize(deserializer)?;
    Ok(true)
}

/// 插件元素 + 增益参数空间
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MimicDescription {
    /// 插件元素
    #[serde(flatten)]
    pub config: MimicConfig,

    /// `gains.<joint>.<key>` 参数空间
    #[serde(default)]
    pub gains: toml::Table,
}

impl MimicDescription {
    /// 从 TOML 字符串解析
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// 从 TOML 文件加载
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 构造参数表
    pub fn parameters(&self) -> ParameterTable {
        ParameterTable::from_gains(&self.gains)
    }
}

/// 基于内存表的参数系统
///
/// 键是点分路径（如 `gains.drive_joint.p`）。每次 `declare_parameter`
/// 都会记录解析结果，便于打印实际生效的参数。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterTable {
    values: BTreeMap<String, f64>,
    declared: BTreeMap<String, f64>,
}

impl ParameterTable {
    /// 创建空参数表
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 `gains` 表构造
    ///
    /// 只接受 `[gains.<joint>]` 下的数值项，其余项忽略并告警。
    pub fn from_gains(gains: &toml::Table) -> Self {
        let mut table = Self::new();
        for (joint, entry) in gains {
            let Some(entry) = entry.as_table() else {
                warn!("Ignoring gains entry \"{}\": expected a table", joint);
                continue;
            };
            for (key, value) in entry {
                let number = match value {
                    toml::Value::Float(v) => *v,
                    toml::Value::Integer(v) => *v as f64,
                    _ => {
                        warn!("Ignoring gains.{}.{}: expected a number", joint, key);
                        continue;
                    },
                };
                table.set(format!("gains.{}.{}", joint, key), number);
            }
        }
        table
    }

    /// 设置参数值
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    /// 读取已设置的参数值（不含默认值）
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// 已声明的参数及其解析结果
    pub fn declared(&self) -> &BTreeMap<String, f64> {
        &self.declared
    }
}

impl ParameterServer for ParameterTable {
    fn declare_parameter(&mut self, name: &str, default: f64) -> f64 {
        let value = self.get(name).unwrap_or(default);
        self.declared.insert(name.to_string(), value);
        value
    }
}
