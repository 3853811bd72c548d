use serde::{Deserialize, Serialize};

/// Indicator family used for grouping and benchmark selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorCategory {
    Liquidity,
    Profitability,
    Leverage,
    OperatingCycle,
    Structural,
}

impl IndicatorCategory {
    pub fn name(&self) -> &'static str {
        match self {
            IndicatorCategory::Liquidity => "Liquidity",
            IndicatorCategory::Profitability => "Profitability",
            IndicatorCategory::Leverage => "Leverage",
            IndicatorCategory::OperatingCycle => "Operating Cycle",
            IndicatorCategory::Structural => "Structural",
        }
    }
}

/// Canonical identity for every indicator column in the source dataset.
///
/// The raw headers are Portuguese accounting labels, several of which carry
/// a trailing space that is part of the key in the source file. All lookups
/// go through [`IndicatorKey::from_raw`], which normalizes whitespace once
/// at ingestion; nothing downstream compares raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IndicatorKey {
    TotalAssets,
    NetRevenue,
    NetIncome,
    Equity,
    CurrentLiabilities,
    NonCurrentLiabilities,
    GeneralLiquidity,
    CurrentRatio,
    QuickRatio,
    CashRatio,
    OverallIndebtedness,
    ThirdPartyCapitalRatio,
    DebtComposition,
    NetMargin,
    ReturnOnAssets,
    ReturnOnEquity,
    AssetTurnover,
    LeverageMultiplier,
    InventoryTurnoverDays,
    ReceivablesDays,
    PayablesDays,
    CashConversionCycle,
}

pub const ALL_KEYS: &[IndicatorKey] = &[
    IndicatorKey::TotalAssets,
    IndicatorKey::NetRevenue,
    IndicatorKey::NetIncome,
    IndicatorKey::Equity,
    IndicatorKey::CurrentLiabilities,
    IndicatorKey::NonCurrentLiabilities,
    IndicatorKey::GeneralLiquidity,
    IndicatorKey::CurrentRatio,
    IndicatorKey::QuickRatio,
    IndicatorKey::CashRatio,
    IndicatorKey::OverallIndebtedness,
    IndicatorKey::ThirdPartyCapitalRatio,
    IndicatorKey::DebtComposition,
    IndicatorKey::NetMargin,
    IndicatorKey::ReturnOnAssets,
    IndicatorKey::ReturnOnEquity,
    IndicatorKey::AssetTurnover,
    IndicatorKey::LeverageMultiplier,
    IndicatorKey::InventoryTurnoverDays,
    IndicatorKey::ReceivablesDays,
    IndicatorKey::PayablesDays,
    IndicatorKey::CashConversionCycle,
];

impl IndicatorKey {
    /// Resolve a raw column header to a canonical key.
    ///
    /// Trims the header and collapses internal whitespace runs, so
    /// `"Liquidez Corrente (LC) "` and `"Liquidez Corrente (LC)"` resolve to
    /// the same key. Returns `None` for the year column and any column the
    /// dataset does not define.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        let key = match normalized.as_str() {
            "Ativo Total" => IndicatorKey::TotalAssets,
            "Receita Líquida" => IndicatorKey::NetRevenue,
            "Lucro Líquido" => IndicatorKey::NetIncome,
            "Patrimônio Líquido" => IndicatorKey::Equity,
            "Passivo Circulante" => IndicatorKey::CurrentLiabilities,
            "Passivo Não Circulante" => IndicatorKey::NonCurrentLiabilities,
            "Liquidez Geral (LG)" => IndicatorKey::GeneralLiquidity,
            "Liquidez Corrente (LC)" => IndicatorKey::CurrentRatio,
            "Liquidez Seca (LS)" => IndicatorKey::QuickRatio,
            "Liquidez Imediata (LI)" => IndicatorKey::CashRatio,
            "Endividamento Geral (EG)" => IndicatorKey::OverallIndebtedness,
            "Participação de Capitais de Terceiros (PCT) – Grau de Endividamento" => {
                IndicatorKey::ThirdPartyCapitalRatio
            }
            "Composição do Endividamento (CE)" => IndicatorKey::DebtComposition,
            "Margem Líquida (ML)" => IndicatorKey::NetMargin,
            "Rentabilidade do Ativo (ROA ou ROI)" => IndicatorKey::ReturnOnAssets,
            "Rentabilidade do Patrimônio Líquido (ROE)" => IndicatorKey::ReturnOnEquity,
            "Giro do Ativo (GA)" => IndicatorKey::AssetTurnover,
            "Multiplicador de Alavancagem Financeira (MAF)" => IndicatorKey::LeverageMultiplier,
            "Prazo Médio de Renovação dos Estoques (PMRE)" => IndicatorKey::InventoryTurnoverDays,
            "Prazo Médio de Recebimento das Vendas (PMRV)" => IndicatorKey::ReceivablesDays,
            "Prazo Médio de Pagamento das Compras (PMPC)" => IndicatorKey::PayablesDays,
            "Ciclo Operacional e Ciclo Financeiro" => IndicatorKey::CashConversionCycle,
            _ => return None,
        };
        Some(key)
    }

    /// Canonical source-file header, trimmed. Exporting with these headers
    /// round-trips through [`IndicatorKey::from_raw`].
    pub fn source_label(&self) -> &'static str {
        match self {
            IndicatorKey::TotalAssets => "Ativo Total",
            IndicatorKey::NetRevenue => "Receita Líquida",
            IndicatorKey::NetIncome => "Lucro Líquido",
            IndicatorKey::Equity => "Patrimônio Líquido",
            IndicatorKey::CurrentLiabilities => "Passivo Circulante",
            IndicatorKey::NonCurrentLiabilities => "Passivo Não Circulante",
            IndicatorKey::GeneralLiquidity => "Liquidez Geral (LG)",
            IndicatorKey::CurrentRatio => "Liquidez Corrente (LC)",
            IndicatorKey::QuickRatio => "Liquidez Seca (LS)",
            IndicatorKey::CashRatio => "Liquidez Imediata (LI)",
            IndicatorKey::OverallIndebtedness => "Endividamento Geral (EG)",
            IndicatorKey::ThirdPartyCapitalRatio => {
                "Participação de Capitais de Terceiros (PCT) – Grau de Endividamento"
            }
            IndicatorKey::DebtComposition => "Composição do Endividamento (CE)",
            IndicatorKey::NetMargin => "Margem Líquida (ML)",
            IndicatorKey::ReturnOnAssets => "Rentabilidade do Ativo (ROA ou ROI)",
            IndicatorKey::ReturnOnEquity => "Rentabilidade do Patrimônio Líquido (ROE)",
            IndicatorKey::AssetTurnover => "Giro do Ativo (GA)",
            IndicatorKey::LeverageMultiplier => "Multiplicador de Alavancagem Financeira (MAF)",
            IndicatorKey::InventoryTurnoverDays => "Prazo Médio de Renovação dos Estoques (PMRE)",
            IndicatorKey::ReceivablesDays => "Prazo Médio de Recebimento das Vendas (PMRV)",
            IndicatorKey::PayablesDays => "Prazo Médio de Pagamento das Compras (PMPC)",
            IndicatorKey::CashConversionCycle => "Ciclo Operacional e Ciclo Financeiro",
        }
    }

    /// Short English name used in reports and the LLM context.
    pub fn name(&self) -> &'static str {
        match self {
            IndicatorKey::TotalAssets => "Total Assets",
            IndicatorKey::NetRevenue => "Net Revenue",
            IndicatorKey::NetIncome => "Net Income",
            IndicatorKey::Equity => "Shareholders' Equity",
            IndicatorKey::CurrentLiabilities => "Current Liabilities",
            IndicatorKey::NonCurrentLiabilities => "Non-Current Liabilities",
            IndicatorKey::GeneralLiquidity => "General Liquidity",
            IndicatorKey::CurrentRatio => "Current Ratio",
            IndicatorKey::QuickRatio => "Quick Ratio",
            IndicatorKey::CashRatio => "Cash Ratio",
            IndicatorKey::OverallIndebtedness => "Overall Indebtedness",
            IndicatorKey::ThirdPartyCapitalRatio => "Third-Party Capital Ratio",
            IndicatorKey::DebtComposition => "Debt Composition",
            IndicatorKey::NetMargin => "Net Margin",
            IndicatorKey::ReturnOnAssets => "Return on Assets",
            IndicatorKey::ReturnOnEquity => "Return on Equity",
            IndicatorKey::AssetTurnover => "Asset Turnover",
            IndicatorKey::LeverageMultiplier => "Leverage Multiplier",
            IndicatorKey::InventoryTurnoverDays => "Inventory Days",
            IndicatorKey::ReceivablesDays => "Receivables Days",
            IndicatorKey::PayablesDays => "Payables Days",
            IndicatorKey::CashConversionCycle => "Cash Conversion Cycle",
        }
    }

    pub fn category(&self) -> IndicatorCategory {
        match self {
            IndicatorKey::TotalAssets
            | IndicatorKey::NetRevenue
            | IndicatorKey::NetIncome
            | IndicatorKey::Equity
            | IndicatorKey::CurrentLiabilities
            | IndicatorKey::NonCurrentLiabilities => IndicatorCategory::Structural,
            IndicatorKey::GeneralLiquidity
            | IndicatorKey::CurrentRatio
            | IndicatorKey::QuickRatio
            | IndicatorKey::CashRatio => IndicatorCategory::Liquidity,
            IndicatorKey::OverallIndebtedness
            | IndicatorKey::ThirdPartyCapitalRatio
            | IndicatorKey::DebtComposition
            | IndicatorKey::LeverageMultiplier => IndicatorCategory::Leverage,
            IndicatorKey::NetMargin
            | IndicatorKey::ReturnOnAssets
            | IndicatorKey::ReturnOnEquity
            | IndicatorKey::AssetTurnover => IndicatorCategory::Profitability,
            IndicatorKey::InventoryTurnoverDays
            | IndicatorKey::ReceivablesDays
            | IndicatorKey::PayablesDays
            | IndicatorKey::CashConversionCycle => IndicatorCategory::OperatingCycle,
        }
    }
}
