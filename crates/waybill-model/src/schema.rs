//! The fixed target schema.
//!
//! Downstream systems key off both the header text and the column position,
//! so [`TARGET_COLUMNS`] and [`TargetColumn::ALL`] are part of the public
//! contract and must stay in lockstep.

use crate::CellValue;

pub const TARGET_COLUMN_COUNT: usize = 29;

/// Header row of every exported spreadsheet, in output order.
pub const TARGET_COLUMNS: [&str; TARGET_COLUMN_COUNT] = [
    "装货单编号",
    "卸货单编号",
    "司机",
    "手机号",
    "车牌号",
    "挂车",
    "装车量(吨)",
    "卸货量(吨)",
    "装车时间",
    "卸货时间",
    "司机运费单价",
    "发货单位名称",
    "发货单位证件号",
    "发货点简称",
    "发货(省)",
    "发货(市)",
    "发货(区)",
    "发货详细地址",
    "发货联系人",
    "发货联系人电话",
    "收货单位名称",
    "收货单位证件号",
    "收获地址简称",
    "收货(省)",
    "收货(市)",
    "收货(区)",
    "收货详细地址",
    "收货联系人",
    "收货联系人电话",
];

/// A target schema column; the discriminant is the output position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(usize)]
pub enum TargetColumn {
    LoadingOrderNo = 0,
    UnloadingOrderNo,
    Driver,
    DriverPhone,
    Plate,
    Trailer,
    LoadedTons,
    UnloadedTons,
    LoadTime,
    UnloadTime,
    DriverTariff,
    ConsignorName,
    ConsignorIdNo,
    ConsignorShortName,
    ConsignorProvince,
    ConsignorCity,
    ConsignorDistrict,
    ConsignorAddress,
    ConsignorContact,
    ConsignorContactPhone,
    ConsigneeName,
    ConsigneeIdNo,
    ConsigneeAddressLabel,
    ConsigneeProvince,
    ConsigneeCity,
    ConsigneeDistrict,
    ConsigneeAddress,
    ConsigneeContact,
    ConsigneeContactPhone,
}

impl TargetColumn {
    pub const ALL: [TargetColumn; TARGET_COLUMN_COUNT] = [
        Self::LoadingOrderNo,
        Self::UnloadingOrderNo,
        Self::Driver,
        Self::DriverPhone,
        Self::Plate,
        Self::Trailer,
        Self::LoadedTons,
        Self::UnloadedTons,
        Self::LoadTime,
        Self::UnloadTime,
        Self::DriverTariff,
        Self::ConsignorName,
        Self::ConsignorIdNo,
        Self::ConsignorShortName,
        Self::ConsignorProvince,
        Self::ConsignorCity,
        Self::ConsignorDistrict,
        Self::ConsignorAddress,
        Self::ConsignorContact,
        Self::ConsignorContactPhone,
        Self::ConsigneeName,
        Self::ConsigneeIdNo,
        Self::ConsigneeAddressLabel,
        Self::ConsigneeProvince,
        Self::ConsigneeCity,
        Self::ConsigneeDistrict,
        Self::ConsigneeAddress,
        Self::ConsigneeContact,
        Self::ConsigneeContactPhone,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn header(self) -> &'static str {
        TARGET_COLUMNS[self as usize]
    }

    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|column| column.header() == header)
    }
}

/// One mapped record: a value for every target column plus the grouping
/// value it was partitioned by.
///
/// The grouping value lives outside the column vector so it can never reach an
/// exported file, even when the grouping column shares a name with a target
/// header.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetRecord {
    cells: [CellValue; TARGET_COLUMN_COUNT],
    group_value: CellValue,
}

impl TargetRecord {
    /// A record with every target column missing.
    pub fn new(group_value: CellValue) -> Self {
        Self {
            cells: std::array::from_fn(|_| CellValue::Missing),
            group_value,
        }
    }

    pub fn get(&self, column: TargetColumn) -> &CellValue {
        &self.cells[column.index()]
    }

    pub fn set(&mut self, column: TargetColumn, value: CellValue) {
        self.cells[column.index()] = value;
    }

    /// Cells in [`TARGET_COLUMNS`] order.
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = (TargetColumn, &CellValue)> {
        TargetColumn::ALL.into_iter().zip(self.cells.iter())
    }

    pub fn group_value(&self) -> &CellValue {
        &self.group_value
    }
}
