//! The five opportunity rules.
//!
//! Each evaluator is a pure function: guards first, then score and
//! bilingual copy. Thresholds come from the active configuration and
//! default to the documented values.

use log::debug;

use crate::config;
use crate::core::score::Score;
use crate::core::Competitor;
use crate::formatting::format_price;
use crate::locale::Bilingual;

use super::{Opportunity, OpportunityMetrics, OpportunityType};

/// Share of the average price the projected gap must exceed.
const PRICE_GAP_MIN_SHARE: f64 = 0.2;
/// Suggested entry price as a fraction of the competitor average.
const SUGGESTED_PRICE_FACTOR: f64 = 0.8;
/// Monthly sales volume an emerging category would reach at full demand.
const EMERGING_VOLUME_BASIS: f64 = 2000.0;

/// Mean over competitors with a known positive price. `None` when no
/// competitor qualifies.
pub fn average_positive_price(competitors: &[Competitor]) -> Option<f64> {
    let prices: Vec<f64> = competitors
        .iter()
        .filter_map(|c| c.price)
        .filter(|p| *p > 0.0)
        .collect();

    if prices.is_empty() {
        None
    } else {
        Some(prices.iter().sum::<f64>() / prices.len() as f64)
    }
}

/// Mean rating across all competitors; unrated ones count as zero.
/// `None` when the list is empty.
pub fn average_rating(competitors: &[Competitor]) -> Option<f64> {
    if competitors.is_empty() {
        None
    } else {
        let total: f64 = competitors.iter().map(|c| c.rating).sum();
        Some(total / competitors.len() as f64)
    }
}

pub fn green_zone_score(demand_score: f64, competitor_strength: f64) -> f64 {
    demand_score * 0.6 + (100.0 - competitor_strength) * 0.4
}

pub fn price_gap_score(profit_margin: f64) -> f64 {
    (profit_margin * 1.5).min(100.0)
}

pub fn content_quality_score(demand_score: f64, avg_rating: f64) -> f64 {
    (50.0 + (demand_score - avg_rating * 20.0)).clamp(0.0, 100.0)
}

pub fn emerging_score(demand_score: f64, competitor_strength: f64) -> f64 {
    (40.0 + (demand_score - 50.0) * 2.0 + (100.0 - competitor_strength) * 0.5).clamp(0.0, 100.0)
}

/// Capped above only; the rule's guards keep the raw value positive.
pub fn niche_score(profit_margin: f64, competitor_strength: f64) -> f64 {
    (profit_margin * 0.7 + (100.0 - competitor_strength) * 0.3).min(100.0)
}

/// Rule 1: strong demand against weak competition.
pub fn evaluate_green_zone(demand_score: f64, competitor_strength: f64) -> Option<Opportunity> {
    let thresholds = config::get_rule_thresholds();
    if !(demand_score > thresholds.green_min_demand
        && competitor_strength < thresholds.green_max_competition)
    {
        return None;
    }

    debug!(
        "green zone fired: demand={demand_score:.1}, competition={competitor_strength:.1}"
    );

    Some(Opportunity {
        opportunity_type: OpportunityType::Green,
        title: Bilingual::new(
            "Golden opportunity: high demand, weak competition",
            "فرصة ذهبية: طلب مرتفع ومنافسة ضعيفة",
        ),
        description: Bilingual::new(
            "Demand for this category is strong while competition is still weak. \
             Early entry secures market share before the field fills up.",
            "الطلب على هذه الفئة قوي بينما المنافسة لا تزال ضعيفة. الدخول المبكر يضمن حصة سوقية قبل ازدحام السوق.",
        ),
        potential_score: Score::from_raw(green_zone_score(demand_score, competitor_strength)),
        action_items: vec![
            Bilingual::new(
                "Enter the market quickly before competition intensifies",
                "ادخل السوق بسرعة قبل اشتداد المنافسة",
            ),
            Bilingual::new(
                "Invest early in building a recognizable brand",
                "استثمر مبكرًا في بناء علامة تجارية مميزة",
            ),
            Bilingual::new(
                "Win customer loyalty through outstanding service quality",
                "اكسب ولاء العملاء بجودة خدمة استثنائية",
            ),
        ],
        metrics: None,
    })
}

/// Rule 2: healthy margin with a meaningful undercut window.
pub fn evaluate_price_gap(profit_margin: f64, competitors: &[Competitor]) -> Option<Opportunity> {
    let thresholds = config::get_rule_thresholds();
    if !(profit_margin > thresholds.price_gap_min_margin
        && competitors.len() >= thresholds.price_gap_min_competitors)
    {
        return None;
    }

    let avg_price = average_positive_price(competitors)?;
    let price_gap = avg_price * profit_margin / 100.0;
    if price_gap <= avg_price * PRICE_GAP_MIN_SHARE {
        return None;
    }

    let suggested_price = avg_price * SUGGESTED_PRICE_FACTOR;
    debug!(
        "price gap fired: avg={avg_price:.2}, gap={price_gap:.2}, suggested={suggested_price:.2}"
    );

    Some(Opportunity {
        opportunity_type: OpportunityType::PriceGap,
        title: Bilingual::new(
            "Price gap: room to undercut the market",
            "فجوة سعرية: مجال لمنافسة الأسعار",
        ),
        description: Bilingual::new(
            format!(
                "Average competitor price is {}. Entering at {} undercuts the market \
                 while keeping a healthy margin.",
                format_price(avg_price),
                format_price(suggested_price)
            ),
            format!(
                "متوسط سعر المنافسين {avg_price:.2} ريال. الدخول بسعر {suggested_price:.2} ريال يمنحك أفضلية سعرية مع الحفاظ على هامش ربح جيد.",
            ),
        ),
        potential_score: Score::from_raw(price_gap_score(profit_margin)),
        action_items: vec![
            Bilingual::new(
                "Negotiate supplier costs to protect the discounted margin",
                "تفاوض على تكاليف التوريد لحماية الهامش بعد التخفيض",
            ),
            Bilingual::new(
                "Launch at the suggested price and watch competitor reactions",
                "ابدأ بالسعر المقترح وراقب ردود فعل المنافسين",
            ),
            Bilingual::new(
                "Highlight the price advantage in category marketing",
                "أبرز الميزة السعرية في تسويق الفئة",
            ),
        ],
        metrics: Some(OpportunityMetrics::PriceGap {
            average_price: format_price(avg_price),
            suggested_price: format_price(suggested_price),
            price_gap: format_price(avg_price - suggested_price),
            competitor_count: competitors.len(),
        }),
    })
}

/// Rule 3: demand exists but incumbents rate poorly.
pub fn evaluate_content_quality(
    demand_score: f64,
    competitors: &[Competitor],
) -> Option<Opportunity> {
    let thresholds = config::get_rule_thresholds();
    if demand_score <= thresholds.content_min_demand {
        return None;
    }

    let avg_rating = average_rating(competitors)?;
    if avg_rating >= thresholds.content_max_avg_rating {
        return None;
    }

    debug!("content quality fired: demand={demand_score:.1}, avg_rating={avg_rating:.2}");

    Some(Opportunity {
        opportunity_type: OpportunityType::ContentQuality,
        title: Bilingual::new(
            "Content quality gap: competitors rate poorly",
            "فجوة في جودة المحتوى: تقييمات المنافسين منخفضة",
        ),
        description: Bilingual::new(
            "Existing sellers hold weak customer ratings. Better product content, \
             photography and service can capture their dissatisfied buyers.",
            "يحصل البائعون الحاليون على تقييمات ضعيفة من العملاء. محتوى أفضل للمنتج وصور احترافية وخدمة مميزة تكسبك عملاءهم غير الراضين.",
        ),
        potential_score: Score::from_raw(content_quality_score(demand_score, avg_rating)),
        action_items: vec![
            Bilingual::new(
                "Publish detailed product descriptions and professional photos",
                "انشر أوصافًا تفصيلية للمنتجات وصورًا احترافية",
            ),
            Bilingual::new(
                "Collect and showcase authentic customer reviews",
                "اجمع تقييمات حقيقية من العملاء واعرضها",
            ),
            Bilingual::new(
                "Answer questions and complaints faster than incumbents",
                "رد على الأسئلة والشكاوى أسرع من المنافسين",
            ),
        ],
        metrics: Some(OpportunityMetrics::ContentQuality {
            average_rating: avg_rating,
            competitor_count: competitors.len(),
        }),
    })
}

/// Rule 4: mid-band demand that is still forming.
pub fn evaluate_emerging(
    demand_score: f64,
    competitor_strength: f64,
    competitors: &[Competitor],
) -> Option<Opportunity> {
    let thresholds = config::get_rule_thresholds();
    if !(demand_score > thresholds.emerging_demand_low
        && demand_score < thresholds.emerging_demand_high
        && competitor_strength < thresholds.emerging_max_competition)
    {
        return None;
    }

    let estimated_monthly_sales = (demand_score / 100.0 * EMERGING_VOLUME_BASIS).round() as u64;
    let competitor_count = competitors.len();
    debug!(
        "emerging fired: demand={demand_score:.1}, estimated_sales={estimated_monthly_sales}"
    );

    Some(Opportunity {
        opportunity_type: OpportunityType::Emerging,
        title: Bilingual::new(
            "Emerging category: demand is forming",
            "فئة صاعدة: الطلب في طور التشكل",
        ),
        description: Bilingual::new(
            format!(
                "Demand is still forming and only {competitor_count} competitors are \
                 active so far. Potential of roughly {estimated_monthly_sales} sales \
                 per month as the category matures."
            ),
            format!(
                "الطلب لا يزال في مرحلة النمو وعدد المنافسين الحاليين {competitor_count} فقط. إمكانية تحقيق نحو {estimated_monthly_sales} عملية بيع شهريًا مع نضوج الفئة.",
            ),
        ),
        potential_score: Score::from_raw(emerging_score(demand_score, competitor_strength)),
        action_items: vec![
            Bilingual::new(
                "Secure inventory before demand peaks",
                "أمن المخزون قبل ذروة الطلب",
            ),
            Bilingual::new(
                "Build category keywords early for organic reach",
                "استهدف الكلمات المفتاحية للفئة مبكرًا لتعزيز الوصول",
            ),
            Bilingual::new(
                "Test price points while competition is thin",
                "جرب مستويات الأسعار بينما المنافسة محدودة",
            ),
        ],
        metrics: Some(OpportunityMetrics::Emerging {
            estimated_monthly_sales,
            competitor_count,
        }),
    })
}

/// Rule 5: small market defensible through margin.
pub fn evaluate_niche(
    demand_score: f64,
    competitor_strength: f64,
    profit_margin: f64,
) -> Option<Opportunity> {
    let thresholds = config::get_rule_thresholds();
    if !(demand_score < thresholds.niche_max_demand
        && profit_margin > thresholds.niche_min_margin
        && competitor_strength < thresholds.niche_max_competition)
    {
        return None;
    }

    debug!("niche fired: margin={profit_margin:.1}, competition={competitor_strength:.1}");

    Some(Opportunity {
        opportunity_type: OpportunityType::Niche,
        title: Bilingual::new(
            "Niche specialization: small market, strong margins",
            "سوق متخصصة: حجم صغير وهوامش قوية",
        ),
        description: Bilingual::new(
            "Demand is modest, but high margins and weak competition make this a \
             defensible niche for a focused seller.",
            "الطلب محدود، لكن الهوامش المرتفعة والمنافسة الضعيفة تجعل هذه الفئة سوقًا متخصصة مناسبة لبائع يركز جهوده.",
        ),
        potential_score: Score::from_raw(niche_score(profit_margin, competitor_strength)),
        action_items: vec![
            Bilingual::new(
                "Serve the niche deeply rather than broadly",
                "اخدم هذه الشريحة بعمق بدلًا من التوسع الأفقي",
            ),
            Bilingual::new(
                "Price for value, not volume",
                "سعر على أساس القيمة لا الكمية",
            ),
            Bilingual::new(
                "Build expertise content that large sellers will not",
                "قدم محتوى متخصصًا لن يقدمه كبار البائعين",
            ),
        ],
        metrics: None,
    })
}
