//! Curated keyword → service/product lookup.
//!
//! Deterministic, human-curated tables. The first entry per keyword is the
//! primary service, the rest are extended recommendations. Lookup order:
//! exact match, fuzzy containment either way, scenario-level fallback.

const KEYWORD_SERVICES: &[(&str, &[&str])] = &[
    // 旅遊
    ("旅遊", &["旅遊套裝行程", "旅遊保險", "旅遊信用卡"]),
    ("機票", &["機票比價平台", "廉價航空票券", "商務艙升等"]),
    ("訂房", &["訂房平台（Booking/Agoda）", "飯店比價", "早鳥優惠"]),
    ("背包客", &["青年旅舍（Hostel）", "廉價機票", "旅遊行李箱"]),
    ("出國", &["出國旅遊保險", "國際漫遊方案", "換匯服務"]),
    ("國內旅遊", &["國內民宿預訂", "高鐵/台鐵票券", "景點門票"]),
    ("民宿", &["民宿預訂平台", "特色民宿體驗", "民宿禮券"]),
    ("旅行社", &["套裝旅遊行程", "客製化旅遊規劃", "跟團旅遊"]),
    ("自由行", &["自由行行程規劃", "景點票券", "租車服務"]),
    ("旅遊景點", &["景點門票預訂", "導覽解說服務", "周邊住宿"]),
    ("便宜機票", &["機票比價平台", "廉價航空訂票", "Last-minute 特惠"]),
    ("旅遊推薦", &["旅遊部落格廣告", "旅遊 App", "KOL 爆料合作"]),
    ("日本旅遊", &["日本旅遊套餐", "JR Pass 鐵路券", "日本 SIM 卡"]),
    ("韓國旅遊", &["韓國旅遊套餐", "K-ETA 電子旅行許可", "韓國 SIM 卡"]),
    ("歐洲旅遊", &["歐洲旅遊套餐", "申根保險", "歐洲火車通票"]),
    ("旅遊保險", &["旅遊平安險", "海外醫療險", "行李遺失理賠"]),
    ("租車", &["租車平台", "國際駕照申請", "GPS 租賃"]),
    // 健康
    ("健康", &["健康檢查套組", "健康管理 App", "健康諮詢服務"]),
    ("養生", &["養生食品", "中醫調理", "養生課程"]),
    ("運動", &["健身房會員", "運動器材", "線上運動課程"]),
    ("睡眠", &["助眠枕頭/床墊", "睡眠追蹤裝置", "助眠營養品"]),
    ("心理健康", &["心理諮商預約", "冥想 App", "壓力管理課程"]),
    ("飲食", &["健康餐盒訂閱", "營養諮詢", "飲食記錄 App"]),
    ("減重", &["減重計畫課程", "代餐/瘦身產品", "健身教練"]),
    ("體重管理", &["體重管理計畫", "代謝檢測", "低卡餐盒"]),
    ("免疫力", &["免疫力保健品", "維他命 C/D", "中醫調補"]),
    ("健檢", &["健康檢查套組", "健康檢查中心", "遠端健康監測"]),
    ("瑜珈", &["瑜珈課程", "瑜珈墊/服裝", "線上瑜珈訂閱"]),
    ("健身", &["健身房會籍", "個人教練", "蛋白質補充品"]),
    ("慢跑", &["跑步鞋", "運動追蹤裝置", "馬拉松報名"]),
    ("排毒", &["排毒飲品", "腸道保健品", "SPA 排毒療程"]),
    // 牙科
    ("牙科", &["牙科診所預約", "口腔健康保險", "電動牙刷"]),
    ("牙醫", &["牙科診所推薦", "牙醫看診預約", "牙科健保方案"]),
    ("矯正", &["牙齒矯正諮詢", "隱形矯正（隱適美）", "矯正費用估算"]),
    ("植牙", &["植牙手術諮詢", "All-on-4 全口重建", "植牙分期付款"]),
    ("洗牙", &["洗牙預約", "超音波潔牙", "居家潔牙組"]),
    ("牙周病", &["牙周病治療", "牙周雷射療程", "牙周保養品"]),
    ("蛀牙", &["蛀牙填補/根管治療", "兒童牙科", "防蛀牙膏"]),
    ("假牙", &["陶瓷假牙", "活動假牙", "全瓷冠修復"]),
    ("牙齒美白", &["冷光美白療程", "居家美白貼片", "美白牙膏"]),
    ("隱適美", &["隱適美矯正諮詢", "Invisalign 套組", "透明矯正器"]),
    ("牙套", &["金屬矯正牙套", "陶瓷牙套", "夜間磨牙防護套"]),
    ("牙結石", &["牙結石清除", "超音波洗牙", "抑菌漱口水"]),
    // 保健品
    ("保健品", &["綜合保健品方案", "保健品訂閱盒", "保健品比價平台"]),
    ("維他命", &["綜合維他命", "維他命 D3/K2", "兒童維他命軟糖"]),
    ("益生菌", &["益生菌膠囊", "益生菌飲品", "腸道菌相檢測"]),
    ("膠原蛋白", &["膠原蛋白粉/飲", "口服美容保健品", "抗老化組合"]),
    ("魚油", &["Omega-3 魚油", "深海魚油膠囊", "兒童魚油"]),
    ("葉黃素", &["葉黃素護眼膠囊", "葉黃素飲品", "3C 護眼組合"]),
    ("鈣片", &["鈣+D3 補充品", "兒童成長鈣", "老年骨骼保健"]),
    ("保健食品", &["功能性保健食品", "有機保健品", "台灣製保健品"]),
    ("營養補充", &["運動營養品", "術後營養補充", "全方位複合維生素"]),
    ("抗氧化", &["抗氧化保健品（Q10）", "白藜蘆醇", "維他命 C 高劑量"]),
    ("蛋白質", &["乳清蛋白", "植物性蛋白粉", "高蛋白飲食計畫"]),
    ("薑黃", &["薑黃膠囊", "薑黃拿鐵", "消炎抗氧化組合"]),
];

/// Scenario-level fallback when a keyword has no entry of its own.
const SCENARIO_FALLBACK: &[(&str, &[&str])] = &[
    ("旅遊", &["旅遊規劃服務", "住宿預訂", "旅遊保險"]),
    ("健康", &["健康檢查", "保健品", "健身課程"]),
    ("牙科", &["牙科診所諮詢", "口腔保健品", "矯正評估"]),
    ("保健品", &["保健品訂閱", "營養諮詢", "健康管理"]),
];

/// Services for a keyword: exact match first, then fuzzy containment in
/// either direction, then the scenario fallback, else empty.
pub fn services_for(term: &str, scenario: &str) -> Vec<String> {
    if let Some((_, svcs)) = KEYWORD_SERVICES.iter().find(|(key, _)| *key == term) {
        return svcs.iter().map(|s| (*s).to_string()).collect();
    }

    if !term.is_empty() {
        if let Some((_, svcs)) = KEYWORD_SERVICES
            .iter()
            .find(|(key, _)| term.contains(key) || key.contains(term))
        {
            return svcs.iter().map(|s| (*s).to_string()).collect();
        }
    }

    if let Some((_, svcs)) = SCENARIO_FALLBACK
        .iter()
        .find(|(name, _)| *name == scenario)
    {
        return svcs.iter().map(|s| (*s).to_string()).collect();
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_wins() {
        assert_eq!(
            services_for("機票", "旅遊"),
            vec!["機票比價平台", "廉價航空票券", "商務艙升等"]
        );
    }

    #[test]
    fn fuzzy_match_on_containment() {
        // "沖繩旅遊" contains the known key "旅遊"
        let svcs = services_for("沖繩旅遊", "");
        assert_eq!(svcs[0], "旅遊套裝行程");
    }

    #[test]
    fn falls_back_to_scenario() {
        assert_eq!(
            services_for("völlig unbekannt", "牙科"),
            vec!["牙科診所諮詢", "口腔保健品", "矯正評估"]
        );
    }

    #[test]
    fn empty_when_nothing_matches() {
        assert!(services_for("völlig unbekannt", "sports").is_empty());
    }
}
