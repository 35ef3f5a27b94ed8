//! 错误类型定义

use thiserror::Error;

/// 挂载（arming）失败原因
///
/// 变体顺序即校验顺序：插件在第一个不满足的前置条件处停止，
/// 只报告这一条诊断，并保持 Unarmed 状态。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// 宿主没有提供模型
    #[error("parent model is NULL")]
    NullModel,

    /// 宿主运行时尚未初始化
    #[error("host runtime has not been initialized, unable to load plugin")]
    RuntimeNotReady,

    /// 配置缺少 `joint`
    #[error("No joint element present. MimicJointPlugin could not be loaded.")]
    MissingJoint,

    /// 配置缺少 `mimicJoint`
    #[error("No mimicJoint element present. MimicJointPlugin could not be loaded.")]
    MissingMimicJoint,

    /// 主关节在模型中不存在
    #[error("No joint named \"{name}\". MimicJointPlugin could not be loaded.")]
    JointNotFound { name: String },

    /// 从动关节在模型中不存在
    #[error("No (mimic) joint named \"{name}\". MimicJointPlugin could not be loaded.")]
    MimicJointNotFound { name: String },

    /// 主关节与从动关节相同
    #[error("Joint \"{name}\" cannot mimic itself. MimicJointPlugin could not be loaded.")]
    SameJoint { name: String },

    /// 插件已经处于 Armed 状态
    #[error("MimicJointPlugin is already armed")]
    AlreadyArmed,
}

/// 配置文件解析错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取失败
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// TOML 格式错误
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}
