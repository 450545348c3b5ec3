#[derive(Debug, Default)]
pub struct Grammar {
    pub rules: Vec<RuleDesc>,
}

#[derive(Debug)]
pub struct RuleDesc {
    pub left: String,
    pub productions: Vec<Production>,
}

/// A production body. No elements means an ε-production.
#[derive(Debug, Default)]
pub struct Production {
    pub elems: Vec<String>,
}
