//! Source column names read by the mapping rules.
//!
//! The source export is produced by a freight platform whose headers are fixed;
//! any of them may be absent from a given file.

pub const DRIVER_NAME: &str = "司机姓名（收款人）";
pub const DRIVER_PHONE: &str = "司机手机号码（收款人）";
pub const PLATE: &str = "车牌";
pub const LOAD_TIME: &str = "装车时间";
pub const UNLOAD_TIME: &str = "卸货时间";
pub const OWNER_NAME: &str = "货主名称";
pub const LOADED_QUANTITY: &str = "司机装货数量";
pub const MILEAGE: &str = "里程";
pub const UNIT_PRICE: &str = "司机运输单价（人民币）";
pub const REGION: &str = "区域";

/// Column the splitter partitions on unless told otherwise.
pub const DEFAULT_GROUP_COLUMN: &str = REGION;
