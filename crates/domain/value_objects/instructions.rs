use serde::Deserialize;

use crate::domain::value_objects::enums::instruction_types::InstructionType;

const PRICE_INSTRUCTION_LINES: [&str; 4] = [
    "Hộ chiếu phải còn thời hạn sử dụng trên 6 tháng, Tính từ ngày khởi hành đi và về.",
    "Hành lý quá cước qui định. Xe vận chuyển ngoài chương trình + Các show về đêm.",
    "Điện thoại, giặt ủi, nước uống trong phòng khách sạn và các chi phí cá nhân khác.",
    "Phí bồi dưỡng cho hướng dẫn viên 125.000VND/Ngày/Khách.",
];

const CAUTION_INSTRUCTION_LINES: [&str; 9] = [
    "Tour du lịch thuần túy, Quý khách vui lòng không rời đoàn.",
    "Du khách Việt Kiều hoặc nước ngoài phải có visa tái nhập nhiều lần hoặc miễn thị thực 5 năm và mang theo khi tham gia tour.",
    "Trẻ em dưới 16 tuổi phải có bố mẹ đi cùng hoặc người được uỷ quyền có giấy uỷ quyền từ bố mẹ.",
    "Hộ chiếu phải mang theo bản gốc hợp lệ không bị rạn, phai mờ, và còn thời hạn sử dụng trên 6 tháng (tính từ ngày khởi hành).",
    "Không sử dụng thẻ xanh. Nếu sử dụng Sổ Du lịch (yêu cầu visa nước nhập cảnh), vui lòng thông báo cho nhân viên nhận tour nếu Quý khách sử dụng các hồ sơ khác ngoài hộ chiếu.",
    "Công ty du lịch không chịu trách nhiệm nếu Quý khách bị từ chối nhập cảnh với bất kỳ lý do nào từ hải quan nước ngoài.",
    "Công ty được phép thay đổi lịch trình chuyến đi và sử dụng các hãng hàng không thay thế, nhưng vẫn đảm bảo tham quan đầy đủ các điểm theo chương trình.",
    "Thứ tự điểm tham quan và lộ trình có thể thay đổi tùy theo tình hình thực tế, nhưng vẫn đảm bảo đầy đủ các điểm tham quan như ban đầu.",
    "Trong trường hợp bất khả kháng như khủng bố, thiên tai hoặc thay đổi lịch trình của phương tiện công cộng (máy bay, tàu hỏa...), Công ty du lịch giữ quyền điều chỉnh lộ trình tour cho phù hợp và an toàn cho khách hàng, mà không phải chịu trách nhiệm bồi thường thiệt hại phát sinh.",
];

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstructionModel {
    pub instruction_type: InstructionType,
    pub description: String,
}

/// Boilerplate every new plan starts with: price notes first, then cautions.
pub fn default_instruction_list() -> Vec<InstructionModel> {
    let price = PRICE_INSTRUCTION_LINES.iter().map(|line| InstructionModel {
        instruction_type: InstructionType::Price,
        description: line.to_string(),
    });
    let caution = CAUTION_INSTRUCTION_LINES.iter().map(|line| InstructionModel {
        instruction_type: InstructionType::Caution,
        description: line.to_string(),
    });

    price.chain(caution).collect()
}
